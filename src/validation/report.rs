use std::fmt;

use crate::error::{VizError, VizResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Stable machine-readable issue codes.
///
/// Callers and tests assert on codes, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    ManifestMissingId,
    ManifestMissingName,
    ManifestMissingIcon,
    ManifestInvalidVersionFormat,
    ManifestNoModes,
    ManifestDuplicateModeIds,
    ModeMissingId,
    PluginCanHandleMismatch,
    PluginCanHandleFailed,
    ConfigUnknownChartType,
    ConfigDefaultNotInEnabled,
    ConfigDuplicateEnabledCharts,
    ConfigEmptyEnabledCharts,
    ConfigEnabledNotInOrder,
    ResultMissing,
    ResultNoClusters,
    ClusterMissingId,
    ClusterParentUnknown,
    ArgumentUnknownCluster,
}

impl IssueCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManifestMissingId => "MANIFEST_MISSING_ID",
            Self::ManifestMissingName => "MANIFEST_MISSING_NAME",
            Self::ManifestMissingIcon => "MANIFEST_MISSING_ICON",
            Self::ManifestInvalidVersionFormat => "MANIFEST_INVALID_VERSION_FORMAT",
            Self::ManifestNoModes => "MANIFEST_NO_MODES",
            Self::ManifestDuplicateModeIds => "MANIFEST_DUPLICATE_MODE_IDS",
            Self::ModeMissingId => "MODE_MISSING_ID",
            Self::PluginCanHandleMismatch => "PLUGIN_CANHANDLE_MISMATCH",
            Self::PluginCanHandleFailed => "PLUGIN_CANHANDLE_FAILED",
            Self::ConfigUnknownChartType => "CONFIG_UNKNOWN_CHART_TYPE",
            Self::ConfigDefaultNotInEnabled => "CONFIG_DEFAULT_NOT_IN_ENABLED",
            Self::ConfigDuplicateEnabledCharts => "CONFIG_DUPLICATE_ENABLED_CHARTS",
            Self::ConfigEmptyEnabledCharts => "CONFIG_EMPTY_ENABLED_CHARTS",
            Self::ConfigEnabledNotInOrder => "CONFIG_ENABLED_NOT_IN_ORDER",
            Self::ResultMissing => "RESULT_MISSING",
            Self::ResultNoClusters => "RESULT_NO_CLUSTERS",
            Self::ClusterMissingId => "CLUSTER_MISSING_ID",
            Self::ClusterParentUnknown => "CLUSTER_PARENT_UNKNOWN",
            Self::ArgumentUnknownCluster => "ARGUMENT_UNKNOWN_CLUSTER",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    #[must_use]
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Accumulated outcome of one validation call.
///
/// Created fresh per call, never mutated after return; validity is purely
/// "no errors", so warnings alone never fail a check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn has_code(&self, code: IssueCode) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|issue| issue.code == code)
    }

    /// Human-readable multi-line summary.
    #[must_use]
    pub fn format(&self) -> String {
        if self.errors.is_empty() && self.warnings.is_empty() {
            return "✓ Validation passed".to_owned();
        }
        let mut out = format!(
            "{} error(s), {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        );
        for issue in self.errors.iter().chain(&self.warnings) {
            out.push_str(&format!("\n  [{}] {}", issue.code, issue.message));
        }
        out
    }

    /// Fails with the formatted detail when the report carries errors.
    pub fn ensure_valid(&self, label: &str) -> VizResult<()> {
        if self.is_valid() {
            return Ok(());
        }
        Err(VizError::ValidationFailed {
            label: label.to_owned(),
            details: self.format(),
        })
    }
}
