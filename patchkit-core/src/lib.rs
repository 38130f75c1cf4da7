//! patchkit-core: tri-state nullable fields
//!
//! `Nullable<T>` carries absent / null / value through JSON payloads and
//! database rows so partial updates can tell "leave it" from "clear it".

pub mod apply;
pub mod error;
pub mod nullable;
pub mod scalar;
pub mod sql;

pub use apply::{apply_optional, apply_value};
pub use error::{NullableError, Result};
pub use nullable::Nullable;
pub use scalar::{ScalarDecodable, ScalarValue, ToScalar};
