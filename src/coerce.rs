//! Declared type tags and per-key coercion.
//!
//! After the merge, each key that appears in the type mapping is rewritten
//! according to a fixed (declared tag × observed runtime type) table. The
//! table is total: every combination either produces a value or fails
//! resolution with a cast error. Keys are independent; order never matters.

use crate::error::ConfigError;
use crate::value::Value;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Declared type tag for a flat key.
///
/// The serde names are the tag strings accepted in serialized type mappings
/// (`boolean`, `integer`, `double`, `array`, `try_integer`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastKind {
    /// The literal string `"true"` becomes `true`; any other string is `false`.
    Boolean,
    /// Lenient base-10 parse of a string's leading numeric prefix.
    Integer,
    /// Lenient floating-point parse of a string's leading numeric prefix.
    Double,
    /// Split a string on `;`; an existing list passes through unchanged.
    Array,
    /// Integer parse that falls back to the original string instead of failing.
    TryInteger,
}

impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CastKind::Boolean => "boolean",
            CastKind::Integer => "integer",
            CastKind::Double => "double",
            CastKind::Array => "array",
            CastKind::TryInteger => "try_integer",
        };
        write!(f, "{name}")
    }
}

/// Apply the coercion table to one key's value.
pub(crate) fn coerce(key: &str, value: Value, declared: CastKind) -> Result<Value, ConfigError> {
    match (declared, value) {
        (CastKind::Boolean, Value::Str(s)) => Ok(Value::Bool(s == "true")),
        (CastKind::Boolean, v @ Value::Bool(_)) => Ok(v),

        (CastKind::Integer, Value::Str(s)) => match parse_int_prefix(&s) {
            Some(i) => Ok(Value::Int(i)),
            None => Err(number_parse(key, s, declared)),
        },
        (CastKind::Double, Value::Str(s)) => match parse_float_prefix(&s) {
            Some(f) => Ok(Value::Float(f)),
            None => Err(number_parse(key, s, declared)),
        },
        (CastKind::TryInteger, Value::Str(s)) => Ok(match s.parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Str(s),
        }),
        (
            CastKind::Integer | CastKind::Double | CastKind::TryInteger,
            v @ (Value::Int(_) | Value::Float(_)),
        ) => Ok(v),

        (CastKind::Array, Value::Str(s)) => {
            Ok(Value::List(s.split(';').map(str::to_string).collect()))
        }
        (CastKind::Array, v @ Value::List(_)) => Ok(v),

        (declared, value) => Err(ConfigError::TypeCast {
            key: key.to_string(),
            observed: value.runtime_type(),
            declared,
        }),
    }
}

fn number_parse(key: &str, value: String, declared: CastKind) -> ConfigError {
    ConfigError::NumberParse {
        key: key.to_string(),
        value,
        declared,
    }
}

/// Leading base-10 integer, `parseInt`-style: optional sign, then digits,
/// trailing garbage ignored.
fn parse_int_prefix(s: &str) -> Option<i64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[+-]?[0-9]+").expect("static pattern"));
    re.find(s.trim_start()).and_then(|m| m.as_str().parse().ok())
}

/// Leading decimal number, `parseFloat`-style: sign, digits with optional
/// fraction (or bare fraction), optional exponent.
fn parse_float_prefix(s: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?").expect("static pattern")
    });
    re.find(s.trim_start()).and_then(|m| m.as_str().parse().ok())
}
