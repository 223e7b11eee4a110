//! Cell values
//!
//! This module provides the payload type stored in every cell together with
//! its runtime type tag.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// Type of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Integer (32-bit)
    Integer,

    /// Big integer (64-bit)
    BigInt,

    /// Floating point (64-bit)
    Float,

    /// Text string
    Text,

    /// Binary data
    Binary,

    /// Boolean
    Boolean,

    /// UUID
    Uuid,

    /// Timestamp
    Timestamp,

    /// JSON data
    Json,

    /// Null value
    Null,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            ValueType::Integer => "integer",
            ValueType::BigInt => "bigint",
            ValueType::Float => "float",
            ValueType::Text => "text",
            ValueType::Binary => "binary",
            ValueType::Boolean => "boolean",
            ValueType::Uuid => "uuid",
            ValueType::Timestamp => "timestamp",
            ValueType::Json => "json",
            ValueType::Null => "null",
        };
        f.write_str(name)
    }
}

/// Value held by a cell
#[derive(Clone, Serialize, Deserialize)]
pub enum Value {
    /// Integer (32-bit)
    Integer(i32),

    /// Big integer (64-bit)
    BigInt(i64),

    /// Floating point (64-bit)
    Float(#[serde(with = "float_repr")] f64),

    /// Text string
    Text(String),

    /// Binary data
    Binary(Vec<u8>),

    /// Boolean
    Boolean(bool),

    /// UUID
    Uuid(Uuid),

    /// Timestamp (as milliseconds since Unix epoch)
    Timestamp(i64),

    /// JSON data
    Json(String),

    /// Null value
    Null,
}

/// JSON has no literal for NaN or the infinities, so those travel as strings
mod float_repr {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Special(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Special(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!("invalid float {:?}", other))),
            },
        }
    }
}

fn preview(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => (&s[..cut], true),
        None => (s, false),
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Integer(v) => write!(f, "Integer({})", v),
            Value::BigInt(v) => write!(f, "BigInt({})", v),
            Value::Float(v) => write!(f, "Float({})", v),
            Value::Text(v) => match preview(v, 20) {
                (head, true) => write!(f, "Text(\"{}...\")", head),
                (whole, false) => write!(f, "Text(\"{}\")", whole),
            },
            Value::Binary(v) => {
                if v.len() > 10 {
                    write!(f, "Binary({} bytes)", v.len())
                } else {
                    write!(f, "Binary({:?})", v)
                }
            }
            Value::Boolean(v) => write!(f, "Boolean({})", v),
            Value::Uuid(v) => write!(f, "Uuid({})", v),
            Value::Timestamp(v) => write!(f, "Timestamp({})", v),
            Value::Json(v) => match preview(v, 20) {
                (head, true) => write!(f, "Json({}...)", head),
                (whole, false) => write!(f, "Json({})", whole),
            },
            Value::Null => write!(f, "Null"),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) | Value::Json(v) => f.write_str(v),
            Value::Binary(v) => write!(f, "<{} bytes>", v.len()),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Uuid(v) => write!(f, "{}", v),
            Value::Timestamp(v) => write!(f, "{}", v),
            Value::Null => Ok(()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                // NaN equals NaN so membership scans can find it
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Get the type of the value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::BigInt(_) => ValueType::BigInt,
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
            Value::Binary(_) => ValueType::Binary,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Uuid(_) => ValueType::Uuid,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::Json(_) => ValueType::Json,
            Value::Null => ValueType::Null,
        }
    }

    /// Whether this is [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text payload, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Integer payload widened to 64 bits, if this is an integer value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(i64::from(*v)),
            Value::BigInt(v) | Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        let values = vec![
            (Value::from(42), ValueType::Integer),
            (Value::from(9_223_372_036_854_775_807i64), ValueType::BigInt),
            (Value::from(3.5), ValueType::Float),
            (Value::from("Hello, world!"), ValueType::Text),
            (Value::from(vec![1u8, 2, 3]), ValueType::Binary),
            (Value::from(true), ValueType::Boolean),
            (Value::from(Uuid::new_v4()), ValueType::Uuid),
            (Value::Timestamp(1_609_459_200_000), ValueType::Timestamp),
            (Value::Json(r#"{"key":"value"}"#.to_string()), ValueType::Json),
            (Value::from(None::<i32>), ValueType::Null),
        ];

        for (value, expected) in values {
            assert_eq!(value.value_type(), expected, "{:?}", value);
        }
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::from("a"), Value::from("a".to_string()));
        assert_ne!(Value::Integer(1), Value::BigInt(1));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Null, Value::from(None::<String>));
        assert_ne!(Value::Null, Value::Text(String::new()));
    }

    #[test]
    fn test_debug_truncates_long_text() {
        let long = Value::from("ääääääääääääääääääääääää");
        assert_eq!(format!("{:?}", long), "Text(\"ääääääääääääääääääää...\")");

        let short = Value::from("Alice");
        assert_eq!(format!("{:?}", short), "Text(\"Alice\")");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(30).to_string(), "30");
        assert_eq!(Value::from("Alice").to_string(), "Alice");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(ValueType::Integer.to_string(), "integer");
    }

    #[test]
    fn test_non_finite_floats_survive_json() {
        let values = vec![
            Value::Float(f64::NAN),
            Value::Float(f64::INFINITY),
            Value::Float(f64::NEG_INFINITY),
            Value::Float(-2.5),
        ];

        let json = serde_json::to_string(&values).unwrap();
        let decoded: Vec<Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, values);
        assert!(json.contains(r#"{"Float":"NaN"}"#));
        assert!(json.contains(r#"{"Float":-2.5}"#));
        assert!(serde_json::from_str::<Value>(r#"{"Float":"many"}"#).is_err());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from("x").as_text(), Some("x"));
        assert_eq!(Value::from(7).as_i64(), Some(7));
        assert_eq!(Value::from(true).as_i64(), None);
        assert!(Value::Null.is_null());
    }
}
