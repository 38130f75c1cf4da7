//! Standard JSON response envelope
//!
//! Every reply has the same shape:
//!
//! ```json
//! { "code": 200, "data": { ... }, "message": "Success" }
//! ```
//!
//! `data` is omitted when there is nothing to return.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// JSON envelope sent for every response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseJson<T = serde_json::Value> {
    /// HTTP status code, repeated in the body
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> IntoResponse for ResponseJson<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or_else(|_| {
            tracing::error!(code = self.code, "invalid status code in response");
            StatusCode::INTERNAL_SERVER_ERROR
        });

        (status, Json(self)).into_response()
    }
}

// Base helpers, for full control over code, data and message

/// Success response with custom status and message.
pub fn success_json<T>(data: T, status: StatusCode, message: impl Into<String>) -> ResponseJson<T> {
    ResponseJson {
        code: status.as_u16(),
        data: Some(data),
        message: message.into(),
    }
}

/// Error response with a message only.
pub fn fail_json(status: StatusCode, message: impl Into<String>) -> ResponseJson {
    ResponseJson {
        code: status.as_u16(),
        data: None,
        message: message.into(),
    }
}

/// Error response carrying details, usually per-field validation errors.
pub fn fail_json_with_details<T>(
    status: StatusCode,
    message: impl Into<String>,
    details: T,
) -> ResponseJson<T> {
    ResponseJson {
        code: status.as_u16(),
        data: Some(details),
        message: message.into(),
    }
}

// Shortcuts by status code

/// 200 for reads and updates.
pub fn ok<T>(data: T) -> ResponseJson<T> {
    success_json(data, StatusCode::OK, "Success")
}

/// 201 for a newly created resource.
pub fn created<T>(data: T) -> ResponseJson<T> {
    success_json(data, StatusCode::CREATED, "Created successfully")
}

/// 200 with a message instead of 204, so clients always get a JSON body.
pub fn deleted() -> ResponseJson {
    ResponseJson {
        code: StatusCode::OK.as_u16(),
        data: None,
        message: "Deleted successfully".into(),
    }
}

pub fn bad_request(message: impl Into<String>) -> ResponseJson {
    fail_json(StatusCode::BAD_REQUEST, message)
}

/// 400 with per-field details.
pub fn validation_error<T>(details: T) -> ResponseJson<T> {
    fail_json_with_details(StatusCode::BAD_REQUEST, "Invalid data", details)
}

/// 401: not logged in, or the token is missing or expired.
pub fn unauthorized() -> ResponseJson {
    fail_json(StatusCode::UNAUTHORIZED, "Please log in")
}

/// 403: logged in but not allowed.
pub fn forbidden() -> ResponseJson {
    fail_json(StatusCode::FORBIDDEN, "You do not have permission to access this resource")
}

pub fn not_found(message: impl Into<String>) -> ResponseJson {
    fail_json(StatusCode::NOT_FOUND, message)
}

/// 500; details belong in the logs, not the body.
pub fn server_error() -> ResponseJson {
    fail_json(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
