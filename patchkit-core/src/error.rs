//! Structured error types for the nullable adapter.
//!
//! Every failure is deterministic for a given input and is returned to the
//! caller as-is. The surrounding HTTP or storage layer decides how to
//! surface it.

use thiserror::Error;

/// Errors raised while decoding, encoding or scanning a `Nullable<T>`
#[derive(Error, Debug)]
pub enum NullableError {
    /// The serialized token could not be parsed into the target type
    #[error("failed to decode value: {0}")]
    Decode(#[source] serde_json::Error),

    /// A storage value could not be coerced into the target type
    #[error("failed to scan type {source_type} into Nullable<{target_type}>")]
    ScanTypeMismatch {
        source_type: &'static str,
        target_type: &'static str,
    },

    /// The value codec itself failed (e.g. the value is not encodable)
    #[error(transparent)]
    Codec(serde_json::Error),
}

/// Result type alias for nullable adapter operations
pub type Result<T> = std::result::Result<T, NullableError>;

impl NullableError {
    /// Create a scan mismatch error
    pub fn scan_mismatch(source_type: &'static str, target_type: &'static str) -> Self {
        Self::ScanTypeMismatch {
            source_type,
            target_type,
        }
    }

    /// True if the error came from parsing client input
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
