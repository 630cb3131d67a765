//! The "any" placeholder for heterogeneous sequences

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// A dynamically typed leaf value.
///
/// `Scalar` is the element type heterogeneous arrays bind against: a
/// `Vec<Scalar>` target accepts an array of mixed leaf kinds, each element
/// keeping its intrinsic representation. Emitting a `Scalar` produces the
/// corresponding leaf node back.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean leaf
    Bool(bool),

    /// Integer leaf
    Integer(i64),

    /// Float leaf
    Float(f64),

    /// String leaf
    Str(String),

    /// Local datetime leaf
    LocalDateTime(NaiveDateTime),

    /// Offset datetime leaf
    OffsetDateTime(DateTime<FixedOffset>),
}

impl Scalar {
    /// Extract a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable name of the wrapped kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
            Scalar::LocalDateTime(_) => "local datetime",
            Scalar::OffsetDateTime(_) => "offset datetime",
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Integer(n)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Float(n)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(dt: NaiveDateTime) -> Self {
        Scalar::LocalDateTime(dt)
    }
}

impl From<DateTime<FixedOffset>> for Scalar {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Scalar::OffsetDateTime(dt)
    }
}
