//! # gbdi-providers
//!
//! The per-provider converters. Each module owns one source format: its
//! source schema, its categorical lookup tables, and the mapping from parsed
//! records into ingest-schema projects. The registry exposes them to the CLI
//! by name.

pub mod becd;
pub mod carbenmats;
pub mod registry;
pub mod slice;
pub mod structural_panda;

pub use becd::Becd;
pub use carbenmats::CarbEnMats;
pub use registry::{available_formats, converter_for};
pub use slice::Slice;
pub use structural_panda::StructuralPanda;
