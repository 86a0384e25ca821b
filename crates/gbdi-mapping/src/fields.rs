//! Record field accessors
//!
//! Extension trait over [`Record`] that turns field lookups into mapping
//! errors carrying the row index and field name, so a skipped record can be
//! reported as "row 17: missing required field 'bldg_roof_type'".

use crate::{Error, Result};
use gbdi_record::{Record, Value};

/// Context-carrying field accessors for source records
pub trait RecordFields {
    /// Text value; absent or null is an error
    fn require_text(&self, field: &str) -> Result<&str>;

    /// Text value if present
    fn optional_text(&self, field: &str) -> Option<&str>;

    /// Decimal value; absent, null, or non-numeric is an error
    fn require_decimal(&self, field: &str) -> Result<f64>;

    /// Decimal value if present and numeric
    fn optional_decimal(&self, field: &str) -> Option<f64>;

    /// Integer value; absent, null, or non-integer is an error
    fn require_integer(&self, field: &str) -> Result<i64>;

    /// Integer value if present
    fn optional_integer(&self, field: &str) -> Option<i64>;
}

impl RecordFields for Record {
    fn require_text(&self, field: &str) -> Result<&str> {
        match self.get(field) {
            Value::Text(s) => Ok(s),
            Value::Null => Err(Error::MissingField {
                row: self.row,
                field: field.to_string(),
            }),
            other => Err(Error::invalid_value(
                self.row,
                field,
                format!("expected text, got {other:?}"),
            )),
        }
    }

    fn optional_text(&self, field: &str) -> Option<&str> {
        self.get(field).as_text()
    }

    fn require_decimal(&self, field: &str) -> Result<f64> {
        match self.get(field) {
            Value::Null => Err(Error::MissingField {
                row: self.row,
                field: field.to_string(),
            }),
            other => other.as_decimal().ok_or_else(|| {
                Error::invalid_value(self.row, field, format!("expected a number, got {other:?}"))
            }),
        }
    }

    fn optional_decimal(&self, field: &str) -> Option<f64> {
        self.get(field).as_decimal()
    }

    fn require_integer(&self, field: &str) -> Result<i64> {
        match self.get(field) {
            Value::Null => Err(Error::MissingField {
                row: self.row,
                field: field.to_string(),
            }),
            other => other.as_integer().ok_or_else(|| {
                Error::invalid_value(self.row, field, format!("expected an integer, got {other:?}"))
            }),
        }
    }

    fn optional_integer(&self, field: &str) -> Option<i64> {
        self.get(field).as_integer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        let mut r = Record::new(17);
        r.set("material", Value::Text("timber".into()));
        r.set("mass", Value::Decimal(12.5));
        r.set("storeys", Value::Integer(4));
        r.set("note", Value::Null);
        r
    }

    #[test]
    fn require_text_present() {
        assert_eq!(record().require_text("material").unwrap(), "timber");
    }

    #[test]
    fn require_text_missing_names_row_and_field() {
        let err = record().require_text("note").unwrap_err();
        assert_eq!(
            err,
            Error::MissingField {
                row: 17,
                field: "note".to_string()
            }
        );
        assert_eq!(err.row(), 17);
        assert!(err.to_string().contains("note"));
    }

    #[test]
    fn require_decimal_accepts_integers() {
        let r = record();
        assert_eq!(r.require_decimal("mass").unwrap(), 12.5);
        assert_eq!(r.require_decimal("storeys").unwrap(), 4.0);
    }

    #[test]
    fn require_decimal_rejects_text() {
        let err = record().require_decimal("material").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
    }

    #[test]
    fn optional_accessors_return_none_for_absent() {
        let r = record();
        assert_eq!(r.optional_text("absent"), None);
        assert_eq!(r.optional_decimal("note"), None);
        assert_eq!(r.optional_integer("storeys"), Some(4));
    }
}
