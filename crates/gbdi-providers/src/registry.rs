//! Converter registry
//!
//! Maps stable format names to converter instances for the CLI.

use crate::{Becd, CarbEnMats, Slice, StructuralPanda};
use gbdi_pipeline::FormatConverter;

/// Names of all registered converters, in listing order
#[must_use]
pub fn available_formats() -> &'static [&'static str] {
    &["structural-panda", "carbenmats", "slice", "becd"]
}

/// Look up a converter by name
#[must_use]
pub fn converter_for(name: &str) -> Option<Box<dyn FormatConverter>> {
    match name {
        "structural-panda" => Some(Box::new(StructuralPanda::new())),
        "carbenmats" => Some(Box::new(CarbEnMats::new())),
        "slice" => Some(Box::new(Slice::new())),
        "becd" => Some(Box::new(Becd::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_format_resolves() {
        for name in available_formats() {
            let converter = converter_for(name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(converter.name(), *name);
        }
    }

    #[test]
    fn unknown_format_is_none() {
        assert!(converter_for("edifact").is_none());
    }
}
