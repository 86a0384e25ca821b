//! CSV reader

use crate::config::CsvConfig;
use crate::errors::{CsvError, CsvResult};
use gbdi_record::{Record, RowIssue, SourceSchema};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
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

/// Reader that parses CSV rows into typed records against a source schema
#[derive(Debug, Clone)]
pub struct CsvReader {
    schema: SourceSchema,
    config: CsvConfig,
}

impl CsvReader {
    /// Create a reader for the given schema with default configuration
    #[must_use]
    pub fn new(schema: SourceSchema) -> Self {
        Self {
            schema,
            config: CsvConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    /// Read a CSV file from disk.
    ///
    /// # Errors
    ///
    /// Returns a [`CsvError`] when the file cannot be opened, its header
    /// cannot be parsed, or a required column is absent.
    pub fn read_path(&self, path: &Path) -> CsvResult<ReadOutcome> {
        let path_display = path.display().to_string();
        info!(path = %path_display, schema = %self.schema.name, "reading csv input");
        let file = File::open(path).map_err(|e| CsvError::io(&path_display, e.to_string()))?;
        self.read(file, &path_display)
    }

    /// Read CSV data from any reader; `source` labels errors.
    ///
    /// # Errors
    ///
    /// Returns a [`CsvError`] on structural problems; see [`Self::read_path`].
    pub fn read<R: Read>(&self, input: R, source: &str) -> CsvResult<ReadOutcome> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .flexible(true)
            .from_reader(input);

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| CsvError::header(source, e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        let header_refs: Vec<&str> = header.iter().map(String::as_str).collect();

        let missing = self.schema.missing_columns(&header_refs);
        if !missing.is_empty() {
            return Err(CsvError::missing_columns(source, &missing));
        }

        // Column positions for the schema's fields, in schema order.
        let positions: HashMap<&str, usize> = header_refs
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, i))
            .collect();

        let mut records = Vec::new();
        let mut issues = Vec::new();

        for (index, raw) in reader.records().enumerate() {
            let row = index + 1;
            let raw = match raw {
                Ok(raw) => raw,
                Err(e) => {
                    issues.push(RowIssue::new(row, format!("unreadable row: {e}")));
                    continue;
                }
            };

            if raw.len() != header.len() {
                issues.push(RowIssue::new(
                    row,
                    format!("expected {} columns, got {}", header.len(), raw.len()),
                ));
                continue;
            }

            debug!(row, "parsing row");
            match self.parse_row(row, &raw, &positions) {
                Ok(record) => records.push(record),
                Err(reason) => issues.push(RowIssue::new(row, reason)),
            }
        }

        info!(
            records = records.len(),
            skipped = issues.len(),
            "csv input parsed"
        );
        Ok(ReadOutcome { records, issues })
    }

    fn parse_row(
        &self,
        row: usize,
        raw: &csv::StringRecord,
        positions: &HashMap<&str, usize>,
    ) -> Result<Record, String> {
        let mut record = Record::new(row);
        for field in &self.schema.fields {
            let cell = positions
                .get(field.name.as_str())
                .and_then(|&i| raw.get(i))
                .unwrap_or("");
            let value = self
                .schema
                .convert_cell(field, cell)
                .map_err(|e| e.to_string())?;
            record.set(field.name.clone(), value);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbdi_record::{FieldDef, FieldType, Value};
    use std::io::Cursor;

    fn schema() -> SourceSchema {
        SourceSchema::new("panda")
            .field(FieldDef::new("component_id").required())
            .field(FieldDef::new("material").required())
            .field(FieldDef::new("mass_kg").with_type(FieldType::Decimal).required())
            .null_sentinel("no data")
    }

    #[test]
    fn reads_all_well_formed_rows_in_order() {
        let data = "component_id,material,mass_kg\nC1,timber,10.5\nC2,steel,20\nC3,concrete,30.25\n";
        let outcome = CsvReader::new(schema())
            .read(Cursor::new(data), "test.csv")
            .unwrap();

        assert_eq!(outcome.records.len(), 3);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.records[0].get("component_id"), &Value::Text("C1".into()));
        assert_eq!(outcome.records[1].get("mass_kg"), &Value::Decimal(20.0));
        assert_eq!(outcome.records[2].row, 3);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let data = "component_id,material\nC1,timber\n";
        let err = CsvReader::new(schema())
            .read(Cursor::new(data), "test.csv")
            .unwrap_err();

        assert!(matches!(err, CsvError::MissingColumns { .. }));
        assert!(err.to_string().contains("mass_kg"));
    }

    #[test]
    fn bad_row_is_skipped_and_reported() {
        let data = "component_id,material,mass_kg\nC1,timber,10.5\nC2,steel,heavy\nC3,concrete,30\n";
        let outcome = CsvReader::new(schema())
            .read(Cursor::new(data), "test.csv")
            .unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].row, 2);
        assert!(outcome.issues[0].reason.contains("mass_kg"));
    }

    #[test]
    fn missing_required_value_is_skipped() {
        let data = "component_id,material,mass_kg\nC1,no data,10.5\nC2,steel,20\n";
        let outcome = CsvReader::new(schema())
            .read(Cursor::new(data), "test.csv")
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.issues[0].row, 1);
        assert!(outcome.issues[0].reason.contains("material"));
    }

    #[test]
    fn short_row_is_reported() {
        let data = "component_id,material,mass_kg\nC1,timber\n";
        let outcome = CsvReader::new(schema())
            .read(Cursor::new(data), "test.csv")
            .unwrap();

        assert!(outcome.records.is_empty());
        assert!(outcome.issues[0].reason.contains("expected 3 columns"));
    }

    #[test]
    fn header_only_input_yields_zero_records() {
        let data = "component_id,material,mass_kg\n";
        let outcome = CsvReader::new(schema())
            .read(Cursor::new(data), "test.csv")
            .unwrap();

        assert!(outcome.records.is_empty());
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn semicolon_delimiter() {
        let data = "component_id;material;mass_kg\nC1;timber;10.5\n";
        let outcome = CsvReader::new(schema())
            .with_config(CsvConfig::new().delimiter(b';'))
            .read(Cursor::new(data), "test.csv")
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = CsvReader::new(schema())
            .read_path(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, CsvError::Io { .. }));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let data = "component_id,material,mass_kg,notes\nC1,timber,10.5,fine\n";
        let outcome = CsvReader::new(schema())
            .read(Cursor::new(data), "test.csv")
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert!(!outcome.records[0].has("notes"));
    }
}
