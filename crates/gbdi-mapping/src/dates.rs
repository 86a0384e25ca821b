//! Timestamp handling
//!
//! BECD exports carry timestamps as `dd/mm/yyyy hh:mm:ss`; only the year
//! survives into the ingest schema.

use chrono::{Datelike, NaiveDateTime};

/// Timestamp layout used by BECD exports
pub const DAY_FIRST_TIMESTAMP: &str = "%d/%m/%Y %H:%M:%S";

/// Extract the year from a day-first timestamp
///
/// # Errors
///
/// Returns the underlying parse error when the input does not match the
/// layout.
pub fn year_from_timestamp(raw: &str) -> Result<i32, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), DAY_FIRST_TIMESTAMP).map(|dt| dt.year())
}
