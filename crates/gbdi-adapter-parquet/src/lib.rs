//! # gbdi-adapter-parquet
//!
//! Schema-checked Parquet reading for GBDI converters.
//!
//! Mirrors the CSV adapter's contract for columnar exports (the SLiCE
//! dataset): the file's columns are verified against the source schema before
//! any record is emitted, rows failing typed conversion are reported and
//! skipped, and everything else is fatal.

pub mod errors;
pub mod reader;

pub use errors::{ParquetReadError, ParquetResult};
pub use reader::{ParquetReader, ReadOutcome};
