#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # gbdi-record
//!
//! Typed source records and explicit source schemas for GBDI converters.
//!
//! Every source format declares its columns up front as an ordered list of
//! typed field descriptors. Adapters check input files against the schema at
//! parse time, so a malformed export fails early with a named column instead
//! of failing late inside a mapping function.

pub mod issue;
pub mod record;
pub mod schema;
pub mod value;

pub use issue::RowIssue;
pub use record::Record;
pub use schema::{FieldDef, FieldType, SchemaError, SourceSchema};
pub use value::Value;
