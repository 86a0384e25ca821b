#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # gbdi-pipeline
//!
//! Run orchestration for GBDI converters.
//!
//! One run is parse → map → validate → write: the adapter parses the source
//! file into typed records (structural problems abort here), the converter
//! maps records into projects (per-record failures are reported and skipped),
//! the validation engine rejects inconsistent projects, and the surviving
//! projects are serialized to the output file in a single write at the end.

pub mod converter;
pub mod report;
pub mod runner;
pub mod split;

pub use converter::{ConvertOutcome, FormatConverter, InputFormat};
pub use report::RunReport;
pub use runner::Runner;
pub use split::{SplitReport, split_file};

use thiserror::Error;

/// Fatal failures that abort a run. Per-record problems never surface here;
/// they are reported on the [`RunReport`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file is missing, unreadable, or structurally invalid
    #[error("cannot read input '{path}': {message}")]
    Input { path: String, message: String },

    /// The output file cannot be written
    #[error("cannot write output '{path}': {message}")]
    Output { path: String, message: String },

    /// A split operation failed
    #[error("cannot split '{path}': {message}")]
    Split { path: String, message: String },
}

impl Error {
    /// Create an input error with path context
    pub fn input(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an output error with path context
    pub fn output(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Output {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a split error with path context
    pub fn split(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Split {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
