//! Validation engine

use crate::rules;
use gbdi_lcax::Project;
use tracing::debug;

/// Strictness level for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrictnessLevel {
    /// Errors reject; warnings are dropped
    Permissive,
    /// Errors reject; warnings are reported
    #[default]
    Standard,
    /// Errors and warnings both reject
    Strict,
}

/// Validation configuration
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Strictness level
    pub strictness: StrictnessLevel,
}

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Issue that rejects the project
    Error,
    /// Issue that is reported but not blocking
    Warning,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Human-readable message
    pub message: String,
    /// Path in the document where the issue was found
    pub path: String,
    /// Severity level
    pub severity: Severity,
    /// Stable rule code
    pub code: &'static str,
}

impl ValidationError {
    /// Create an error-severity finding
    pub fn error(code: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
            severity: Severity::Error,
            code,
        }
    }

    /// Create a warning-severity finding
    pub fn warning(
        code: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
            severity: Severity::Warning,
            code,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

/// Outcome of validating one project
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Whether the project passed under the configured strictness
    pub is_valid: bool,
    /// Blocking findings
    pub errors: Vec<ValidationError>,
    /// Non-blocking findings
    pub warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// A passing result with no findings
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a finding with its severity
    pub fn add(&mut self, finding: ValidationError) {
        match finding.severity {
            Severity::Error => {
                self.is_valid = false;
                self.errors.push(finding);
            }
            Severity::Warning => self.warnings.push(finding),
        }
    }

    /// Whether any blocking finding was recorded
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether any non-blocking finding was recorded
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Main validation engine
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Create an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a specific configuration
    #[must_use]
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create an engine at the given strictness
    #[must_use]
    pub fn with_strictness(strictness: StrictnessLevel) -> Self {
        Self {
            config: ValidationConfig { strictness },
        }
    }

    /// Validate a converted project
    #[must_use]
    pub fn validate(&self, project: &Project) -> ValidationResult {
        let mut result = ValidationResult::valid();

        rules::check_identity(project, &mut result);
        rules::check_geometry(project, &mut result);
        rules::check_results(project, &mut result);

        match self.config.strictness {
            StrictnessLevel::Permissive => result.warnings.clear(),
            StrictnessLevel::Standard => {}
            StrictnessLevel::Strict => {
                if result.has_warnings() {
                    result.is_valid = false;
                }
            }
        }

        debug!(
            project = %project.id,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            valid = result.is_valid,
            "validated project"
        );
        result
    }
}
