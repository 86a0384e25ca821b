//! Run reports

use gbdi_record::RowIssue;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one converter run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Input file path
    pub input: PathBuf,
    /// Output file path
    pub output: PathBuf,
    /// Converter name
    pub format: String,
    /// Data rows read from the input (including skipped ones)
    pub rows_read: usize,
    /// Projects written to the output
    pub projects_written: usize,
    /// Rows skipped during parsing or mapping
    pub row_issues: Vec<RowIssue>,
    /// Projects rejected by validation, with their findings
    pub rejected_projects: Vec<String>,
    /// Validation warnings on projects that were still written
    pub validation_warnings: Vec<String>,
    /// Wall-clock duration of the run
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    /// Whether the run finished without any skipped or rejected records
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.row_issues.is_empty() && self.rejected_projects.is_empty()
    }

    /// Total number of records that did not make it into the output
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.row_issues.len() + self.rejected_projects.len()
    }
}
