//! Deterministic record identities
//!
//! Every generated id is a UUID v5 in the URL namespace over a canonical
//! seed, so converting the same input twice yields the same ids. Seeds are
//! either a record fingerprint in schema field order or a provider-chosen
//! natural key.

use gbdi_record::{Record, SourceSchema};
use uuid::Uuid;

/// UUID v5 over an arbitrary seed string
#[must_use]
pub fn id_from_seed(seed: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, seed.as_bytes()).to_string()
}

/// UUID v5 over the record's fingerprint in schema field order
#[must_use]
pub fn id_from_record(record: &Record, schema: &SourceSchema) -> String {
    id_from_seed(&record.fingerprint(schema))
}
