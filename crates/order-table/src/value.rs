//! Tagged Cell Values

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Placeholder the order export writes for unknown fields
pub const SENTINEL: &str = "?";

/// A single cell, typed once at ingestion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// Integral number
    Int(i64),
    /// Non-integral number
    Float(f64),
    /// Free text, including the `"?"` sentinel
    Text(String),
    /// Truly missing
    #[default]
    Absent,
}

impl Value {
    /// Whether the cell is truly missing
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Whether the cell is the literal `"?"` placeholder
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Value::Text(s) if s == SENTINEL)
    }

    /// Numeric view of the cell, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer view of the cell, if it is an `Int`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrow the text, if the cell is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Textual representation used for category matching.
    ///
    /// Numbers and text are not unified: `Int(1)` is `"1"`, `Float(1.0)` is
    /// `"1.0"`, and a missing cell reads as `"nan"`. Floats use the shortest
    /// round-trip digits with a signed, two-digit exponent (`"1e+16"`).
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Int(v) => Cow::Owned(v.to_string()),
            Value::Float(v) => Cow::Owned(float_text(*v)),
            Value::Text(s) => Cow::Borrowed(s),
            Value::Absent => Cow::Borrowed("nan"),
        }
    }
}

fn float_text(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    let repr = format!("{:?}", v);
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
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

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_representation() {
        assert_eq!(Value::Int(1).to_text(), "1");
        assert_eq!(Value::Float(1.0).to_text(), "1.0");
        assert_eq!(Value::Float(0.5).to_text(), "0.5");
        assert_eq!(Value::from("J").to_text(), "J");
        assert_eq!(Value::Absent.to_text(), "nan");
    }

    #[test]
    fn test_float_exponent_and_special_forms() {
        assert_eq!(Value::Float(1e16).to_text(), "1e+16");
        assert_eq!(Value::Float(1.5e-5).to_text(), "1.5e-05");
        assert_eq!(Value::Float(2.5e123).to_text(), "2.5e+123");
        assert_eq!(Value::Float(123456.0).to_text(), "123456.0");
        assert_eq!(Value::Float(f64::NAN).to_text(), "nan");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_text(), "-inf");
    }

    #[test]
    fn test_numeric_and_text_forms_differ() {
        assert_ne!(Value::Int(1).to_text(), Value::Float(1.0).to_text());
        assert_eq!(Value::Int(1).to_text(), Value::from("1").to_text());
    }

    #[test]
    fn test_sentinel_is_not_absent() {
        let v = Value::from(SENTINEL);
        assert!(v.is_sentinel());
        assert!(!v.is_absent());
        assert!(Value::Absent.is_absent());
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_i64(), None);
        assert_eq!(Value::from("3").as_f64(), None);
        assert_eq!(Value::from(None::<i64>), Value::Absent);
    }
}
