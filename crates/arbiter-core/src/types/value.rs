//! Runtime value types for event context data
//!
//! The `Value` enum represents all possible values carried in an event
//! context, similar to JSON values. Condition evaluation works on untyped
//! context maps, so `Value` also carries the explicit coercion rules used
//! by the comparison operators.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 for simplicity, handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (key-value map)
    Object(HashMap<String, Value>),
}

impl Value {
    /// True if this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric coercion used by the ordering and range operators.
    ///
    /// Numbers pass through, booleans map to 1/0, strings are parsed as
    /// f64. Everything else (and unparseable strings) yields NaN, which
    /// compares false against any bound.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// String coercion used by the substring operators.
    ///
    /// Null coerces to the empty string; arrays and objects coerce to
    /// their JSON rendering.
    pub fn coerce_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }

    /// Loose equality for the equals/not_equals operators.
    ///
    /// Structurally equal values are equal. Otherwise, when both sides
    /// carry a numeric interpretation (numbers, numeric strings, booleans
    /// as 1/0) they are compared numerically, so `"42"` equals `42`.
    /// All remaining cross-type pairs are unequal.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if self == other {
            return true;
        }

        let (a, b) = (self.as_number(), other.as_number());
        if !a.is_nan() && !b.is_nan() {
            return a == b;
        }

        false
    }
}

/// Dotted-path lookup into a context map (e.g. `"customer.total_spent"`).
///
/// Any missing intermediate key yields `None`, never an error. Traversal
/// only descends through `Value::Object` nodes.
pub fn get_path<'a>(context: &'a HashMap<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = context.get(segments.next()?)?;

    for key in segments {
        match current {
            Value::Object(map) => current = map.get(key)?,
            _ => return None,
        }
    }

    Some(current)
}
