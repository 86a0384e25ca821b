//! Row-level issues
//!
//! A row issue is the report for one skipped input row: its 1-based data-row
//! index and the reason it was rejected. Issues flow from the adapters and
//! converters into the run report; they never abort a run.

use serde::{Deserialize, Serialize};

/// One skipped row with its position and reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    /// 1-based index of the data row in the input
    pub row: usize,
    /// Human-readable reason the row was skipped
    pub reason: String,
}

impl RowIssue {
    /// Create a row issue
    pub fn new(row: usize, reason: impl Into<String>) -> Self {
        Self {
            row,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.reason)
    }
}
