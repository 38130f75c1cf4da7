//! Database layer - connection pool and repositories
//!
//! Pool limits are fixed:
//!
//! - at most 10 open connections
//! - 5 connections kept warm
//! - connections recycled after 5 minutes

pub mod pool;
pub mod schema;
pub mod repos;

pub use pool::{connect, DbError};
pub use repos::*;
