//! Parquet reader

use crate::errors::{ParquetReadError, ParquetResult};
use gbdi_record::{FieldDef, FieldType, Record, RowIssue, SourceSchema, Value};
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Records read from a file plus the rows that failed typed conversion
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    /// Successfully parsed records, in input order
    pub records: Vec<Record>,
    /// Rows skipped during parsing
    pub issues: Vec<RowIssue>,
}

/// Reader that parses Parquet rows into typed records against a source schema
#[derive(Debug, Clone)]
pub struct ParquetReader {
    schema: SourceSchema,
}

impl ParquetReader {
    /// Create a reader for the given schema
    #[must_use]
    pub fn new(schema: SourceSchema) -> Self {
        Self { schema }
    }

    /// Read a Parquet file from disk.
    ///
    /// # Errors
    ///
    /// Returns a [`ParquetReadError`] when the file cannot be opened, is not
    /// valid Parquet, or a required column is absent.
    pub fn read_path(&self, path: &Path) -> ParquetResult<ReadOutcome> {
        let path_display = path.display().to_string();
        info!(path = %path_display, schema = %self.schema.name, "reading parquet input");

        let file = File::open(path).map_err(|e| ParquetReadError::io(&path_display, e.to_string()))?;
        let reader = SerializedFileReader::new(file)
            .map_err(|e| ParquetReadError::format(&path_display, e.to_string()))?;

        let columns: Vec<String> = reader
            .metadata()
            .file_metadata()
            .schema_descr()
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let column_refs: Vec<&str> = columns.iter().map(String::as_str).collect();

        let missing = self.schema.missing_columns(&column_refs);
        if !missing.is_empty() {
            return Err(ParquetReadError::missing_columns(&path_display, &missing));
        }

        let rows = reader
            .get_row_iter(None)
            .map_err(|e| ParquetReadError::format(&path_display, e.to_string()))?;

        let mut records = Vec::new();
        let mut issues = Vec::new();

        for (index, row) in rows.enumerate() {
            let row_index = index + 1;
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    issues.push(RowIssue::new(row_index, format!("unreadable row: {e}")));
                    continue;
                }
            };

            debug!(row = row_index, "parsing row");
            let mut record = Record::new(row_index);
            let mut failure = None;

            for (name, field) in row.get_column_iter() {
                let Some(def) = self.schema.get(name) else {
                    continue;
                };
                match self.convert_field(def, field) {
                    Ok(value) => record.set(def.name.clone(), value),
                    Err(reason) => {
                        failure = Some(reason);
                        break;
                    }
                }
            }

            // A field declared in the schema but absent from this row (all
            // columns exist, so this only happens for nulls the column iter
            // skips) reads as null; required nulls were already rejected.
            match failure {
                Some(reason) => issues.push(RowIssue::new(row_index, reason)),
                None => match self.check_required(&record) {
                    Ok(()) => records.push(record),
                    Err(reason) => issues.push(RowIssue::new(row_index, reason)),
                },
            }
        }

        info!(
            records = records.len(),
            skipped = issues.len(),
            "parquet input parsed"
        );
        Ok(ReadOutcome { records, issues })
    }

    fn convert_field(&self, def: &FieldDef, field: &Field) -> Result<Value, String> {
        let value = match field {
            Field::Null => Value::Null,
            Field::Str(s) if self.schema.is_null_sentinel(s) => Value::Null,
            Field::Str(s) => self
                .schema
                .convert_cell(def, s)
                .map_err(|e| e.to_string())?,
            Field::Bool(b) => Value::Text(b.to_string()),
            Field::Int(i) => numeric(def, f64::from(*i), i64::from(*i)),
            Field::Long(l) => {
                #[allow(clippy::cast_precision_loss)]
                let as_decimal = *l as f64;
                numeric(def, as_decimal, *l)
            }
            Field::Float(f) => decimal_only(def, f64::from(*f))?,
            Field::Double(d) => decimal_only(def, *d)?,
            other => {
                return Err(format!(
                    "field '{}': unsupported parquet value {other:?}",
                    def.name
                ));
            }
        };

        if value.is_null() && def.required {
            return Err(format!("missing required field '{}'", def.name));
        }
        Ok(value)
    }

    fn check_required(&self, record: &Record) -> Result<(), String> {
        for name in self.schema.required_fields() {
            if !record.has(name) {
                return Err(format!("missing required field '{name}'"));
            }
        }
        Ok(())
    }
}

fn numeric(def: &FieldDef, as_decimal: f64, as_integer: i64) -> Value {
    match def.field_type {
        FieldType::Integer => Value::Integer(as_integer),
        FieldType::Decimal => Value::Decimal(as_decimal),
        FieldType::Text => Value::Text(as_integer.to_string()),
    }
}

fn decimal_only(def: &FieldDef, value: f64) -> Result<Value, String> {
    match def.field_type {
        FieldType::Decimal => Ok(Value::Decimal(value)),
        FieldType::Text => Ok(Value::Text(value.to_string())),
        FieldType::Integer => Err(format!(
            "field '{}': expected integer, got decimal {value}",
            def.name
        )),
    }
}
