//! Scalar results of a program, in a JSON-friendly shape.

use icfp_eval::Value;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value a program reduced to.
///
/// Serialises as `{ "type": "int", "value": "1337" }`; integers travel as
/// decimal strings so arbitrary precision survives JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Output {
    Bool(bool),
    Int(#[serde(with = "decimal")] BigInt),
    String(String),
}

impl Output {
    /// Convert a fully evaluated value. Deferred values have no output form.
    pub fn from_value(value: Value<'_>) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(b)),
            Value::Int(n) => Some(Self::Int(n)),
            Value::Str(s) => Some(Self::String(s)),
            Value::Deferred(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

mod decimal {
    use num_bigint::BigInt;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(n: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(n)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
