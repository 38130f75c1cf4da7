//! Scalar storage protocol
//!
//! `ScalarValue` is the single-column value a storage driver hands back for
//! a row read, or accepts for a bind. Conversion into a concrete Rust type
//! goes through `ScalarDecodable`, implemented per supported type. Each
//! implementation tries, in order:
//!
//! 1. a direct variant match
//! 2. raw bytes copied as text (textual types only)
//! 3. raw bytes decoded as JSON (everything else)
//! 4. a lossless coercion from a neighbouring variant

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// A single column value as produced or consumed by a storage driver
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Uuid(Uuid),
}

impl ScalarValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Runtime type name, used in mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Timestamp(_) => "timestamp",
            Self::Date(_) => "date",
            Self::Uuid(_) => "uuid",
        }
    }
}

/// Types that can be read out of a non-null `ScalarValue`
pub trait ScalarDecodable: Sized {
    /// Name reported as the target in mismatch errors
    const TYPE_NAME: &'static str;

    /// Coerce a non-null value, or `None` if no rule applies.
    fn from_scalar(raw: ScalarValue) -> Option<Self>;
}

/// Types that can be written as a `ScalarValue`
pub trait ToScalar {
    fn to_scalar(&self) -> ScalarValue;
}

fn json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    serde_json::from_slice(bytes).ok()
}

fn integral(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64, so the upper bound is exclusive
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

// `as` rounds past 2^53 (f64) or 2^24 (f32), so check the value survives
// the trip back. 2^63 saturates to i64::MAX on the way back, hence the bound.
fn int_to_f64(v: i64) -> Option<f64> {
    let f = v as f64;
    (f < i64::MAX as f64 && f as i64 == v).then_some(f)
}

fn int_to_f32(v: i64) -> Option<f32> {
    let f = v as f32;
    (f < i64::MAX as f32 && f as i64 == v).then_some(f)
}

macro_rules! impl_scalar_int {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl ScalarDecodable for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_scalar(raw: ScalarValue) -> Option<Self> {
                match raw {
                    ScalarValue::Int(v) => <$ty>::try_from(v).ok(),
                    ScalarValue::Bytes(bytes) => json_bytes(&bytes),
                    ScalarValue::Float(f) => integral(f).and_then(|v| <$ty>::try_from(v).ok()),
                    _ => None,
                }
            }
        }

        impl ToScalar for $ty {
            fn to_scalar(&self) -> ScalarValue {
                ScalarValue::Int(i64::from(*self))
            }
        }
    )*};
}

impl_scalar_int!(i16 => "i16", i32 => "i32", i64 => "i64");

impl ScalarDecodable for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_scalar(raw: ScalarValue) -> Option<Self> {
        match raw {
            ScalarValue::Float(f) => Some(f),
            ScalarValue::Bytes(bytes) => json_bytes(&bytes),
            ScalarValue::Int(v) => int_to_f64(v),
            _ => None,
        }
    }
}

impl ToScalar for f64 {
    fn to_scalar(&self) -> ScalarValue {
        ScalarValue::Float(*self)
    }
}

impl ScalarDecodable for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_scalar(raw: ScalarValue) -> Option<Self> {
        match raw {
            ScalarValue::Float(f) => {
                let narrowed = f as f32;
                (f64::from(narrowed) == f || f.is_nan()).then_some(narrowed)
            }
            ScalarValue::Bytes(bytes) => json_bytes(&bytes),
            ScalarValue::Int(v) => int_to_f32(v),
            _ => None,
        }
    }
}

impl ToScalar for f32 {
    fn to_scalar(&self) -> ScalarValue {
        ScalarValue::Float(f64::from(*self))
    }
}

impl ScalarDecodable for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_scalar(raw: ScalarValue) -> Option<Self> {
        match raw {
            ScalarValue::Bool(b) => Some(b),
            ScalarValue::Bytes(bytes) => json_bytes(&bytes),
            ScalarValue::Int(0) => Some(false),
            ScalarValue::Int(1) => Some(true),
            _ => None,
        }
    }
}

impl ToScalar for bool {
    fn to_scalar(&self) -> ScalarValue {
        ScalarValue::Bool(*self)
    }
}

impl ScalarDecodable for String {
    const TYPE_NAME: &'static str = "string";

    fn from_scalar(raw: ScalarValue) -> Option<Self> {
        match raw {
            ScalarValue::Text(s) => Some(s),
            // text columns: copy as-is, never re-decode; invalid UTF-8 is a mismatch
            ScalarValue::Bytes(bytes) => String::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

impl ToScalar for String {
    fn to_scalar(&self) -> ScalarValue {
        ScalarValue::Text(self.clone())
    }
}

impl ScalarDecodable for Vec<u8> {
    const TYPE_NAME: &'static str = "bytes";

    fn from_scalar(raw: ScalarValue) -> Option<Self> {
        match raw {
            ScalarValue::Bytes(bytes) => Some(bytes),
            ScalarValue::Text(s) => Some(s.into_bytes()),
            _ => None,
        }
    }
}

impl ToScalar for Vec<u8> {
    fn to_scalar(&self) -> ScalarValue {
        ScalarValue::Bytes(self.clone())
    }
}

impl ScalarDecodable for DateTime<Utc> {
    const TYPE_NAME: &'static str = "DateTime<Utc>";

    fn from_scalar(raw: ScalarValue) -> Option<Self> {
        match raw {
            ScalarValue::Timestamp(ts) => Some(ts),
            ScalarValue::Bytes(bytes) => json_bytes(&bytes),
            ScalarValue::Text(s) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|ts| ts.with_timezone(&Utc)),
            _ => None,
        }
    }
}

impl ToScalar for DateTime<Utc> {
    fn to_scalar(&self) -> ScalarValue {
        ScalarValue::Timestamp(*self)
    }
}

impl ScalarDecodable for NaiveDate {
    const TYPE_NAME: &'static str = "NaiveDate";

    fn from_scalar(raw: ScalarValue) -> Option<Self> {
        match raw {
            ScalarValue::Date(d) => Some(d),
            ScalarValue::Bytes(bytes) => json_bytes(&bytes),
            ScalarValue::Text(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok(),
            ScalarValue::Timestamp(ts) => Some(ts.date_naive()),
            _ => None,
        }
    }
}

impl ToScalar for NaiveDate {
    fn to_scalar(&self) -> ScalarValue {
        ScalarValue::Date(*self)
    }
}

impl ScalarDecodable for Uuid {
    const TYPE_NAME: &'static str = "Uuid";

    fn from_scalar(raw: ScalarValue) -> Option<Self> {
        match raw {
            ScalarValue::Uuid(id) => Some(id),
            // binary uuid columns come back as the 16 raw bytes
            ScalarValue::Bytes(bytes) if bytes.len() == 16 => Uuid::from_slice(&bytes).ok(),
            ScalarValue::Bytes(bytes) => json_bytes(&bytes),
            ScalarValue::Text(s) => Uuid::parse_str(&s).ok(),
            _ => None,
        }
    }
}

impl ToScalar for Uuid {
    fn to_scalar(&self) -> ScalarValue {
        ScalarValue::Uuid(*self)
    }
}

impl ScalarDecodable for serde_json::Value {
    const TYPE_NAME: &'static str = "serde_json::Value";

    fn from_scalar(raw: ScalarValue) -> Option<Self> {
        use serde_json::Value;

        match raw {
            ScalarValue::Bytes(bytes) => json_bytes(&bytes),
            ScalarValue::Text(s) => Some(Value::String(s)),
            ScalarValue::Bool(b) => Some(Value::Bool(b)),
            ScalarValue::Int(v) => Some(Value::from(v)),
            ScalarValue::Float(f) => serde_json::Number::from_f64(f).map(Value::Number),
            _ => None,
        }
    }
}

impl ToScalar for serde_json::Value {
    fn to_scalar(&self) -> ScalarValue {
        ScalarValue::Bytes(self.to_string().into_bytes())
    }
}
