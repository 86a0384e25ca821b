//! Source records
//!
//! A record is one parsed row of a source file: typed values keyed by column
//! name plus the 1-based index of the data row it came from. Row indices are
//! carried through mapping so that every skipped record can be reported
//! against its position in the input.

use crate::schema::SourceSchema;
use crate::value::Value;
use std::collections::HashMap;

/// One parsed row of a source file
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based index of the data row in the input (header excluded)
    pub row: usize,
    values: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record for the given data row
    #[must_use]
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: HashMap::new(),
        }
    }

    /// Set a field value
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Get a field value; absent fields read as `Null`
    #[must_use]
    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&Value::Null)
    }

    /// Whether the field is present and non-null
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        !self.get(name).is_null()
    }

    /// Number of populated fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no populated fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Canonical fingerprint of the record in schema field order.
    ///
    /// Stable across runs for identical input, independent of the internal
    /// map ordering; used to derive deterministic record identities.
    #[must_use]
    pub fn fingerprint(&self, schema: &SourceSchema) -> String {
        let mut parts = Vec::with_capacity(schema.len());
        for field in &schema.fields {
            parts.push(format!("{}={}", field.name, self.get(&field.name).canonical()));
        }
        parts.join("|")
    }
}
