//! Text normalization helpers

/// Project name fallback: absent source names become "Unknown"
#[must_use]
pub fn name_or_unknown(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Normalize a categorical value for lookup: trimmed and lowercased
#[must_use]
pub fn lookup_key(value: &str) -> String {
    value.trim().to_lowercase()
}
