//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - Graceful shutdown
//! - JSON response envelope for every reply

pub mod error;
pub mod response;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use response::ResponseJson;
pub use server::{build_router, run_server, AppState, ServerConfig};
