//! Source schema definitions
//!
//! A `SourceSchema` is the explicit, ordered description of the columns a
//! converter expects from its source format: name, type, and whether a value
//! is required in every row. Adapters verify the schema against the input
//! header before emitting records and convert cells to typed values while
//! reading.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Free text
    Text,
    /// Integer (64-bit)
    Integer,
    /// Decimal number
    Decimal,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Decimal => write!(f, "decimal"),
        }
    }
}

/// Definition of a single source field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Column name as it appears in the source file
    pub name: String,
    /// Field data type
    pub field_type: FieldType,
    /// Whether every row must carry a non-null value
    pub required: bool,
}

impl FieldDef {
    /// Create a new optional text field
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Text,
            required: false,
        }
    }

    /// Set the field type
    #[must_use]
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Mark the field as required in every row
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Ordered, typed description of a source format's columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSchema {
    /// Schema name (provider identifier)
    pub name: String,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
    /// Cell contents treated as absent values (case-insensitive)
    pub null_sentinels: Vec<String>,
    /// Name → position lookup
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SourceSchema {
    /// Create a schema with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            null_sentinels: vec![String::new()],
            index: HashMap::new(),
        }
    }

    /// Add a field definition
    #[must_use]
    pub fn field(mut self, def: FieldDef) -> Self {
        self.index.insert(def.name.clone(), self.fields.len());
        self.fields.push(def);
        self
    }

    /// Treat the given cell content as an absent value (case-insensitive)
    #[must_use]
    pub fn null_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.null_sentinels.push(sentinel.into().to_lowercase());
        self
    }

    /// Look up a field definition by column name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Position of a column in the declaration order
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// All required column names
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }

    /// Number of declared fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Required columns absent from the input header.
    ///
    /// Any entry here makes the input structurally unreadable: the run must
    /// abort rather than emit records with silently missing columns. Optional
    /// columns may be absent; their values read as null.
    #[must_use]
    pub fn missing_columns(&self, header: &[&str]) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required && !header.contains(&f.name.as_str()))
            .map(|f| f.name.clone())
            .collect()
    }

    /// Whether the raw cell content is one of the schema's null sentinels
    #[must_use]
    pub fn is_null_sentinel(&self, raw: &str) -> bool {
        let lowered = raw.trim().to_lowercase();
        self.null_sentinels.iter().any(|s| *s == lowered)
    }

    /// Convert one raw cell into a typed value.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when a required value is absent or the cell
    /// cannot be parsed as the declared type.
    pub fn convert_cell(&self, def: &FieldDef, raw: &str) -> Result<Value, SchemaError> {
        let trimmed = raw.trim();
        if self.is_null_sentinel(trimmed) {
            if def.required {
                return Err(SchemaError::MissingRequiredField(def.name.clone()));
            }
            return Ok(Value::Null);
        }

        match def.field_type {
            FieldType::Text => Ok(Value::Text(trimmed.to_string())),
            FieldType::Integer => trimmed
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| SchemaError::TypeMismatch {
                    field: def.name.clone(),
                    expected: FieldType::Integer,
                    found: trimmed.to_string(),
                }),
            FieldType::Decimal => trimmed
                .parse::<f64>()
                .map(Value::Decimal)
                .map_err(|_| SchemaError::TypeMismatch {
                    field: def.name.clone(),
                    expected: FieldType::Decimal,
                    found: trimmed.to_string(),
                }),
        }
    }
}

/// Schema violations detected while parsing a row
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// A required field has no value
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),

    /// A cell does not parse as the declared type
    #[error("field '{field}': expected {expected}, got '{found}'")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: String,
    },
}
