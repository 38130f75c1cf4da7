//! Tri-state nullable container
//!
//! `Nullable<T>` tells apart the three states a client-supplied or
//! database-read field can be in:
//!
//! - `Absent`: the key was not in the payload
//! - `Null`: the key was sent as `null`, or the column was NULL
//! - `Present(v)`: a real value
//!
//! PATCH handlers need all three: an absent field leaves the stored value
//! alone, an explicit null clears it, a value overwrites it.
//!
//! # Presence
//!
//! Decoding a `Nullable` always marks it as set. Serde only calls
//! `Deserialize` for keys that are actually in the input, so struct fields
//! must be annotated with `#[serde(default)]` to fall back to `Absent` when
//! the key is missing:
//!
//! ```
//! use patchkit_core::Nullable;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize, Serialize)]
//! struct PatchProduct {
//!     #[serde(default, skip_serializing_if = "Nullable::is_absent")]
//!     price: Nullable<f64>,
//! }
//!
//! let patch: PatchProduct = serde_json::from_str("{}").unwrap();
//! assert!(patch.price.is_absent());
//!
//! let patch: PatchProduct = serde_json::from_str(r#"{"price": null}"#).unwrap();
//! assert!(patch.price.is_null());
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{NullableError, Result};
use crate::scalar::{ScalarDecodable, ScalarValue, ToScalar};

/// JSON null marker
const NULL_TOKEN: &[u8] = b"null";

/// A field that may be absent, explicitly null, or hold a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    /// Field was not supplied
    Absent,
    /// Field was supplied as null
    Null,
    /// Field was supplied with a value
    Present(T),
}

impl<T> Nullable<T> {
    /// An absent field (`set = false`, `valid = false`).
    pub const fn absent() -> Self {
        Self::Absent
    }

    /// An explicitly null field (`set = true`, `valid = false`).
    pub const fn null() -> Self {
        Self::Null
    }

    /// A field holding `value` (`set = true`, `valid = true`).
    pub const fn of(value: T) -> Self {
        Self::Present(value)
    }

    /// True if the field was supplied, null or not.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// True if the field holds a non-null value.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The held value, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    /// The held value, or `T::default()` when absent or null.
    pub fn data_or_default(&self) -> T
    where
        T: Clone + Default,
    {
        self.data().cloned().unwrap_or_default()
    }

    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Self::Absent => Nullable::Absent,
            Self::Null => Nullable::Null,
            Self::Present(value) => Nullable::Present(value),
        }
    }

    /// Map the held value, keeping absent and null as they are.
    pub fn map<U, F>(self, f: F) -> Nullable<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Absent => Nullable::Absent,
            Self::Null => Nullable::Null,
            Self::Present(value) => Nullable::Present(f(value)),
        }
    }

    /// Decode a single JSON token.
    ///
    /// The literal `null` yields `Null`; anything else must decode as `T`.
    /// Calling this marks the field as set, so only call it for keys that
    /// were present in the source payload.
    pub fn decode_json(bytes: &[u8]) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        if bytes.trim_ascii() == NULL_TOKEN {
            return Ok(Self::Null);
        }

        serde_json::from_slice(bytes)
            .map(Self::Present)
            .map_err(NullableError::Decode)
    }

    /// Encode as a single JSON token.
    ///
    /// Absent and null both encode as `null`; whether the key is written at
    /// all is the enclosing struct's decision.
    pub fn encode_json(&self) -> Result<Vec<u8>>
    where
        T: Serialize,
    {
        match self {
            Self::Present(value) => serde_json::to_vec(value).map_err(NullableError::Codec),
            _ => Ok(NULL_TOKEN.to_vec()),
        }
    }

    /// Build from a storage value. A storage read always counts as set.
    pub fn scan_from(raw: ScalarValue) -> Result<Self>
    where
        T: ScalarDecodable,
    {
        if raw.is_null() {
            return Ok(Self::Null);
        }

        let source_type = raw.type_name();
        match T::from_scalar(raw) {
            Some(value) => Ok(Self::Present(value)),
            None => {
                tracing::debug!(source_type, target_type = T::TYPE_NAME, "scalar coercion failed");
                Err(NullableError::scan_mismatch(source_type, T::TYPE_NAME))
            }
        }
    }

    /// Overwrite `self` with a storage value.
    ///
    /// On error `self` is left untouched and should be discarded.
    pub fn scan(&mut self, raw: ScalarValue) -> Result<()>
    where
        T: ScalarDecodable,
    {
        *self = Self::scan_from(raw)?;
        Ok(())
    }

    /// Storage value to write: NULL unless a value is held.
    pub fn to_scalar(&self) -> ScalarValue
    where
        T: ToScalar,
    {
        match self {
            Self::Present(value) => value.to_scalar(),
            _ => ScalarValue::Null,
        }
    }
}

// no `T: Default` bound, unlike the derive
impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Null,
        }
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        match value {
            Nullable::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Present(value) => value.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
