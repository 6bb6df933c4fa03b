//! Graph validation
//!
//! Linters report problems as [`LintingIssue`] values. A non-empty list
//! containing errors means the graph is invalid; what to do about it (exit
//! codes, formatting) is decided by the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

mod graph_linter;
mod project_linter;
mod scheme_linter;
mod settings_linter;
mod target_linter;

pub use graph_linter::GraphLinter;
pub use project_linter::ProjectLinter;
pub use scheme_linter::SchemeLinter;
pub use settings_linter::SettingsLinter;
pub use target_linter::TargetLinter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LintingIssue {
    pub reason: String,
    pub severity: Severity,
}

impl LintingIssue {
    pub fn new(reason: impl Into<String>, severity: Severity) -> Self {
        Self {
            reason: reason.into(),
            severity,
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::new(reason, Severity::Error)
    }

    pub fn warning(reason: impl Into<String>) -> Self {
        Self::new(reason, Severity::Warning)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for LintingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.reason)
    }
}

/// Whether any issue has error severity
pub fn has_errors(issues: &[LintingIssue]) -> bool {
    issues.iter().any(LintingIssue::is_error)
}
