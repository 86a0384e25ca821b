//! Run orchestration
//!
//! The runner drives one conversion end to end. The output file is written
//! in a single operation after every record has been parsed, mapped, and
//! validated, so a failed run never leaves partial output behind.

use crate::converter::{FormatConverter, InputFormat};
use crate::report::RunReport;
use crate::{Error, Result};
use gbdi_adapter_csv::{CsvConfig, CsvReader};
use gbdi_adapter_parquet::ParquetReader;
use gbdi_lcax::Project;
use gbdi_record::{Record, RowIssue};
use gbdi_validate::{StrictnessLevel, ValidationEngine};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Drives parse → map → validate → write for one input file
#[derive(Debug, Clone, Default)]
pub struct Runner {
    strictness: StrictnessLevel,
}

impl Runner {
    /// Create a runner with standard validation strictness
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the validation strictness
    #[must_use]
    pub fn with_strictness(mut self, strictness: StrictnessLevel) -> Self {
        self.strictness = strictness;
        self
    }

    /// Run one conversion. The default output path is the input path with a
    /// `.json` extension.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`Error`] when the input is unreadable or structurally
    /// invalid, or the output cannot be written. Per-record problems are
    /// reported on the [`RunReport`] instead.
    pub fn run(
        &self,
        converter: &dyn FormatConverter,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<RunReport> {
        let started = Instant::now();
        let output = output.map_or_else(|| input.with_extension("json"), Path::to_path_buf);
        info!(
            format = converter.name(),
            input = %input.display(),
            output = %output.display(),
            "starting conversion"
        );

        let (records, mut row_issues) = self.read_records(converter, input)?;
        let rows_read = records.len() + row_issues.len();

        let outcome = converter.convert(records);
        row_issues.extend(outcome.issues);

        let (projects, rejected, validation_warnings) = self.validate(outcome.projects);

        for issue in &row_issues {
            warn!(format = converter.name(), "{issue}");
        }
        for rejection in &rejected {
            warn!(format = converter.name(), "{rejection}");
        }

        write_projects(&projects, &output)?;

        let report = RunReport {
            input: input.to_path_buf(),
            output,
            format: converter.name().to_string(),
            rows_read,
            projects_written: projects.len(),
            row_issues,
            rejected_projects: rejected,
            validation_warnings,
            elapsed: started.elapsed(),
        };
        info!(
            format = converter.name(),
            rows = report.rows_read,
            written = report.projects_written,
            skipped = report.skipped(),
            "conversion finished"
        );
        Ok(report)
    }

    fn read_records(
        &self,
        converter: &dyn FormatConverter,
        input: &Path,
    ) -> Result<(Vec<Record>, Vec<RowIssue>)> {
        match converter.input_format() {
            InputFormat::Csv { delimiter } => {
                let reader = CsvReader::new(converter.schema().clone())
                    .with_config(CsvConfig::new().delimiter(delimiter));
                let outcome = reader
                    .read_path(input)
                    .map_err(|e| Error::input(input.display().to_string(), e.to_string()))?;
                Ok((outcome.records, outcome.issues))
            }
            InputFormat::Parquet => {
                let reader = ParquetReader::new(converter.schema().clone());
                let outcome = reader
                    .read_path(input)
                    .map_err(|e| Error::input(input.display().to_string(), e.to_string()))?;
                Ok((outcome.records, outcome.issues))
            }
        }
    }

    fn validate(&self, projects: Vec<Project>) -> (Vec<Project>, Vec<String>, Vec<String>) {
        let engine = ValidationEngine::with_strictness(self.strictness);
        let mut kept = Vec::with_capacity(projects.len());
        let mut rejected = Vec::new();
        let mut warnings = Vec::new();

        for project in projects {
            let result = engine.validate(&project);
            if result.is_valid {
                for finding in &result.warnings {
                    warnings.push(format!("project '{}': {finding}", project.id));
                }
                kept.push(project);
            } else {
                let findings: Vec<String> = result
                    .errors
                    .iter()
                    .chain(&result.warnings)
                    .map(ToString::to_string)
                    .collect();
                rejected.push(format!(
                    "project '{}': {}",
                    project.id,
                    findings.join("; ")
                ));
            }
        }

        (kept, rejected, warnings)
    }
}

fn write_projects(projects: &[Project], output: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(projects)
        .map_err(|e| Error::output(output.display().to_string(), e.to_string()))?;
    std::fs::write(output, json)
        .map_err(|e| Error::output(output.display().to_string(), e.to_string()))?;
    info!(path = %output.display(), "output written");
    Ok(())
}
