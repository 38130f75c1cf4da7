//! patchkit-server: web-service scaffold
//!
//! Environment configuration, a pooled Postgres connection, the standard
//! JSON response envelope, and the domain entities whose PATCH requests are
//! built on `patchkit_core::Nullable`.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod telemetry;

pub use config::{Config, ConfigError};
pub use http::{run_server, ApiError, ServerConfig};
