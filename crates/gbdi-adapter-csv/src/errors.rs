//! Error types for the CSV adapter
//!
//! Only structural failures surface here; per-row problems become
//! [`gbdi_record::RowIssue`]s on the read outcome instead.

use thiserror::Error;

/// Structural failures while reading a CSV file. All of these abort the run.
#[derive(Error, Debug, Clone)]
pub enum CsvError {
    /// The file cannot be opened or read
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    /// The file is missing columns the schema requires
    #[error("'{path}' is missing required columns: {columns}")]
    MissingColumns { path: String, columns: String },

    /// The header itself cannot be parsed
    #[error("cannot parse header of '{path}': {message}")]
    Header { path: String, message: String },
}

impl CsvError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing-columns error from the offending column names
    pub fn missing_columns(path: impl Into<String>, columns: &[String]) -> Self {
        Self::MissingColumns {
            path: path.into(),
            columns: columns.join(", "),
        }
    }

    /// Create a header parse error
    pub fn header(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Header {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;
