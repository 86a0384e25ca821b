//! Typed cell values for source records

use serde::{Deserialize, Serialize};

/// A single cell value parsed from a source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// String value
    Text(String),

    /// Integer value
    Integer(i64),

    /// Decimal value
    Decimal(f64),

    /// Absent value (empty cell or a recognized null sentinel)
    Null,
}

impl Value {
    /// Render the value as a string, if it has one
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value
    #[must_use]
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Value::Decimal(d) => Some(*d),
            #[allow(clippy::cast_precision_loss)]
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view of the value
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is absent
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Canonical string rendering used for record fingerprints.
    ///
    /// Deterministic for a given value; `Null` renders as the empty string so
    /// fingerprints are stable across optional columns.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Decimal(d) => {
                // Integral decimals render without the trailing ".0" so that
                // "50" and 50.0 fingerprint identically.
                if d.fract() == 0.0 && d.is_finite() {
                    format!("{d:.0}")
                } else {
                    d.to_string()
                }
            }
            Value::Null => String::new(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Decimal(d)
    }
}
