//! API error type with IntoResponse
//!
//! Errors are converted to the standard response envelope. Server-side
//! failures are logged and answered with a generic message.
//!
//! The router only serves `/health`, so most conversions here exist for
//! handlers built on top of this crate. A PATCH handler takes
//! `Result<Json<UpdateCountryRequest>, JsonRejection>`, loads the row through
//! `CountryRepository`, calls `UpdateCountryRequest::apply`, and returns
//! `Result<_, ApiError>` so every failure lands here via `?`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use patchkit_core::NullableError;
use serde_json::json;

use super::response;
use crate::db::DbError;
use crate::models::CountryError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request body (400)
    BadRequest { message: String },

    /// A field failed validation (400, with details)
    Validation { field: &'static str, message: String },

    /// Resource not found (404)
    NotFound { message: String },

    /// Unique constraint hit (409)
    Conflict { message: String },

    /// Database error (500, logged)
    Database(String),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest { message } => response::bad_request(message).into_response(),
            Self::Validation { field, message } => {
                response::validation_error(json!({ field: message })).into_response()
            }
            Self::NotFound { message } => response::not_found(message).into_response(),
            Self::Conflict { message } => {
                response::fail_json(StatusCode::CONFLICT, message).into_response()
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                response::server_error().into_response()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                response::server_error().into_response()
            }
        }
    }
}

impl From<NullableError> for ApiError {
    fn from(e: NullableError) -> Self {
        match e {
            NullableError::Decode(_) => Self::BadRequest {
                message: e.to_string(),
            },
            _ => Self::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<CountryError> for ApiError {
    fn from(e: CountryError) -> Self {
        match e {
            CountryError::NotFound => Self::NotFound {
                message: e.to_string(),
            },
            CountryError::InvalidName => Self::Validation {
                field: "name",
                message: e.to_string(),
            },
            CountryError::InvalidSlug => Self::Validation {
                field: "slug",
                message: e.to_string(),
            },
            CountryError::SlugExists => Self::Conflict {
                message: e.to_string(),
            },
            CountryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::extract::FromRequest;
    use axum::http::{header, Request};
    use axum::Json;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn decode_error_is_400() {
        let json_err = serde_json::from_str::<i64>("\"x\"").unwrap_err();
        let err = ApiError::from(NullableError::Decode(json_err));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn scan_mismatch_is_500_without_details() {
        let err = ApiError::from(NullableError::scan_mismatch("bool", "i64"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Internal server error");
    }

    #[tokio::test]
    async fn country_errors_map_to_status() {
        let response = ApiError::from(CountryError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::from(CountryError::SlugExists).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = ApiError::from(CountryError::InvalidSlug).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["data"]["slug"], "invalid slug");
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let request = Request::builder()
            .method("PATCH")
            .uri("/countries/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name": "#))
            .unwrap();
        let rejection = Json::<Value>::from_request(request, &()).await.unwrap_err();

        let response = ApiError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn invalid_name_reports_field() {
        let response = ApiError::from(CountryError::InvalidName).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["data"]["name"].is_string());
    }

    #[tokio::test]
    async fn db_error_is_500() {
        let response = ApiError::from(DbError::MissingUrl).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
