//! Runtime value domain for resolved configuration entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved configuration value.
///
/// Every source contributes values in this domain: file content is narrowed
/// from JSON/YAML during flattening, environment overrides always arrive as
/// strings, and type coercion may rewrite a value into another variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// String value.
    Str(String),
    /// Whole number (integer file content, coerced integer strings).
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Sequence of strings (array leaves, split string values).
    List(Vec<String>),
}

impl Value {
    /// The runtime-type name used in cast error messages.
    ///
    /// `Int` and `Float` both report as `number`; the integer/double split
    /// only exists on the declared side of a coercion.
    pub fn runtime_type(&self) -> RuntimeType {
        match self {
            Value::Str(_) => RuntimeType::String,
            Value::Int(_) | Value::Float(_) => RuntimeType::Number,
            Value::Bool(_) => RuntimeType::Boolean,
            Value::List(_) => RuntimeType::Array,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

/// Observed runtime type of a value, as named in cast error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeType {
    String,
    Number,
    Boolean,
    Array,
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuntimeType::String => "string",
            RuntimeType::Number => "number",
            RuntimeType::Boolean => "boolean",
            RuntimeType::Array => "array",
        };
        write!(f, "{name}")
    }
}
