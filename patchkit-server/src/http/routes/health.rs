//! Health check endpoint

use axum::{routing::get, Router};
use serde::Serialize;

use crate::http::response::{self, ResponseJson};

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health() -> ResponseJson<HealthResponse> {
    response::ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_ok() {
        let body = health().await;
        assert_eq!(body.code, 200);
        assert_eq!(body.data.map(|d| d.status), Some("ok"));
    }
}
