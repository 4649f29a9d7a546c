//! Scalar value model
//!
//! Every scalar that reaches the trace goes through [`TraceValue`], so the
//! set of emitted JSON types is closed and a single `match` decides how each
//! one is written.

use std::fmt;

use super::writer::StructuredWriter;
use crate::error::Result;

/// A scalar trace payload
#[derive(Debug, Clone, PartialEq)]
pub enum TraceValue {
    Int(i32),
    Int64(i64),
    UInt(u32),
    UInt64(u64),
    Double(f64),
    Bool(bool),
    /// Written as a one-character string
    Char(char),
    String(String),
}

impl TraceValue {
    /// Write this value through a structured writer
    pub fn write_to(&self, writer: &mut dyn StructuredWriter) -> Result<()> {
        match self {
            TraceValue::Int(v) => writer.int(*v),
            TraceValue::Int64(v) => writer.int64(*v),
            TraceValue::UInt(v) => writer.uint(*v),
            TraceValue::UInt64(v) => writer.uint64(*v),
            TraceValue::Double(v) => writer.double(*v),
            TraceValue::Bool(v) => writer.bool(*v),
            TraceValue::Char(c) => {
                let mut buf = [0u8; 4];
                writer.string(c.encode_utf8(&mut buf))
            }
            TraceValue::String(s) => writer.string(s),
        }
    }

    /// Convert to a `serde_json::Value`, used when comparing against parsed traces
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            TraceValue::Int(v) => (*v).into(),
            TraceValue::Int64(v) => (*v).into(),
            TraceValue::UInt(v) => (*v).into(),
            TraceValue::UInt64(v) => (*v).into(),
            TraceValue::Double(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            TraceValue::Bool(v) => (*v).into(),
            TraceValue::Char(c) => c.to_string().into(),
            TraceValue::String(s) => s.clone().into(),
        }
    }
}

impl fmt::Display for TraceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceValue::Int(v) => write!(f, "{v}"),
            TraceValue::Int64(v) => write!(f, "{v}"),
            TraceValue::UInt(v) => write!(f, "{v}"),
            TraceValue::UInt64(v) => write!(f, "{v}"),
            TraceValue::Double(v) => write!(f, "{v}"),
            TraceValue::Bool(v) => write!(f, "{v}"),
            TraceValue::Char(c) => write!(f, "{c}"),
            TraceValue::String(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for TraceValue {
                fn from(v: $ty) -> Self {
                    TraceValue::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    i32 => Int,
    i64 => Int64,
    u32 => UInt,
    u64 => UInt64,
    f64 => Double,
    bool => Bool,
    char => Char,
    String => String,
}

impl From<&str> for TraceValue {
    fn from(v: &str) -> Self {
        TraceValue::String(v.to_string())
    }
}

impl From<usize> for TraceValue {
    fn from(v: usize) -> Self {
        TraceValue::UInt64(v as u64)
    }
}

impl From<isize> for TraceValue {
    fn from(v: isize) -> Self {
        TraceValue::Int64(v as i64)
    }
}

/// Element types that can live in a [`TracedVec`](crate::container::TracedVec).
///
/// `Display` feeds the `name[index]{value}` text used in comments;
/// [`trace_value`](TraceElement::trace_value) feeds snapshots.
pub trait TraceElement: Clone + fmt::Display {
    fn trace_value(&self) -> TraceValue;
}

macro_rules! impl_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TraceElement for $ty {
                fn trace_value(&self) -> TraceValue {
                    TraceValue::from(self.clone())
                }
            }
        )*
    };
}

impl_element!(i32, i64, u32, u64, usize, isize, f64, bool, char, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_pick_expected_variant() {
        assert_eq!(TraceValue::from(-3i32), TraceValue::Int(-3));
        assert_eq!(TraceValue::from(7usize), TraceValue::UInt64(7));
        assert_eq!(TraceValue::from('x'), TraceValue::Char('x'));
        assert_eq!(TraceValue::from("pivot"), TraceValue::String("pivot".into()));
    }

    #[test]
    fn test_to_json() {
        assert_eq!(TraceValue::Int(4).to_json(), serde_json::json!(4));
        assert_eq!(TraceValue::Char('a').to_json(), serde_json::json!("a"));
        assert_eq!(TraceValue::Double(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_display() {
        assert_eq!(TraceValue::Double(1.5).to_string(), "1.5");
        assert_eq!(TraceValue::Bool(true).to_string(), "true");
        assert_eq!(12i64.trace_value(), TraceValue::Int64(12));
    }
}
