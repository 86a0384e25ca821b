//! Error types for the Parquet adapter

use thiserror::Error;

/// Structural failures while reading a Parquet file. All of these abort the
/// run; per-row problems become row issues on the read outcome.
#[derive(Error, Debug)]
pub enum ParquetReadError {
    /// The file cannot be opened
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    /// The file is not valid Parquet
    #[error("'{path}' is not a readable parquet file: {message}")]
    Format { path: String, message: String },

    /// The file is missing columns the schema requires
    #[error("'{path}' is missing required columns: {columns}")]
    MissingColumns { path: String, columns: String },
}

impl ParquetReadError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a format error with path context
    pub fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
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
}

/// Result type alias for Parquet operations
pub type ParquetResult<T> = std::result::Result<T, ParquetReadError>;
