//! Context values attached to a log record
//!
//! Call sites pass context as an ordered, alternating sequence of keys and
//! values. Every entry is a [`FieldValue`], so the conversion to text or JSON
//! is an exhaustive match rather than a runtime type switch.

use std::borrow::Cow;
use std::fmt;

/// Value type for a single context entry (key or value)
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Missing value; also used to pad an odd-length context
    Null,
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// Error text captured at the call site
    Error(String),
    Bytes(Vec<u8>),
    /// Default structural representation (`{:?}`) captured at the call site
    Debug(String),
}

impl FieldValue {
    /// Capture an error by its message
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        FieldValue::Error(err.to_string())
    }

    /// Capture a value through its `Display` representation
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        FieldValue::String(value.to_string())
    }

    /// Capture a value through its `Debug` representation
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        FieldValue::Debug(format!("{:?}", value))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Text form used by every formatter.
    ///
    /// `Null` becomes `"null"`, errors become their message, bytes are read
    /// as lossy UTF-8 and everything else uses its canonical text.
    pub fn coerce(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed("null"),
            FieldValue::String(s) | FieldValue::Error(s) | FieldValue::Debug(s) => {
                Cow::Borrowed(s.as_str())
            }
            FieldValue::Int(i) => Cow::Owned(i.to_string()),
            FieldValue::Uint(u) => Cow::Owned(u.to_string()),
            FieldValue::Float(f) => Cow::Owned(f.to_string()),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            FieldValue::Bytes(b) => String::from_utf8_lossy(b),
        }
    }

    /// Convert to a JSON value; `None` when the value has no JSON form
    /// (non-finite floats).
    #[must_use]
    pub fn to_json_value(&self) -> Option<serde_json::Value> {
        let value = match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Value::Number(serde_json::Number::from_f64(*f)?),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            other => serde_json::Value::String(other.coerce().into_owned()),
        };
        Some(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coerce())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(b: Vec<u8>) -> Self {
        FieldValue::Bytes(b)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(b: &[u8]) -> Self {
        FieldValue::Bytes(b.to_vec())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
