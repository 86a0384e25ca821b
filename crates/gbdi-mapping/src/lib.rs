//! # gbdi-mapping
//!
//! Field mapping machinery shared by all format converters.
//!
//! Converters read typed [`gbdi_record::Record`]s through the [`RecordFields`]
//! accessors, which attach row and field context to every failure, and use
//! the helper modules for the transforms that recur across providers: numeric
//! coercion, unit conversion, country resolution, timestamp handling, and
//! deterministic record identities.

pub mod country;
pub mod dates;
pub mod fields;
pub mod ident;
pub mod text;
pub mod units;

pub use fields::RecordFields;

use thiserror::Error;

/// Mapping failures for a single record.
///
/// These are recoverable: the pipeline reports the record with its row index
/// and continues with the remaining input. The message itself stays free of
/// the row index; reporting adds it once.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A field the mapping needs is absent or null
    #[error("missing required field '{field}'")]
    MissingField { row: usize, field: String },

    /// A field is present but cannot be used as requested
    #[error("field '{field}': {message}")]
    InvalidValue {
        row: usize,
        field: String,
        message: String,
    },

    /// A categorical value has no entry in the mapping table
    #[error("unknown {category}: '{value}'")]
    UnknownCategory {
        row: usize,
        category: String,
        value: String,
    },
}

impl Error {
    /// Create an invalid-value error with row and field context
    pub fn invalid_value(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            row,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-category error with row context
    pub fn unknown_category(
        row: usize,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::UnknownCategory {
            row,
            category: category.into(),
            value: value.into(),
        }
    }

    /// The input row the failure belongs to
    #[must_use]
    pub fn row(&self) -> usize {
        match self {
            Self::MissingField { row, .. }
            | Self::InvalidValue { row, .. }
            | Self::UnknownCategory { row, .. } => *row,
        }
    }
}

/// Result type alias for mapping operations
pub type Result<T> = std::result::Result<T, Error>;
