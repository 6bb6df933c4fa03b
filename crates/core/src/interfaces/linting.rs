//! Linter interfaces
//!
//! One trait per linter role. Every implementation is a pure function of
//! its inputs: it never fails and never mutates the graph, it only returns
//! the issues it found in the order it found them.

use crate::graph::{Graph, Project, Scheme, Settings, Target, TargetLookup};
use crate::linting::LintingIssue;

/// Validates a single target
pub trait TargetLinting: Send + Sync {
    /// Dependencies are only checked when the owning project is given
    fn lint(&self, target: &Target, project: Option<&Project>) -> Vec<LintingIssue>;
}

/// Validates build settings
pub trait SettingsLinting: Send + Sync {
    fn lint(&self, settings: &Settings) -> Vec<LintingIssue>;
}

/// Validates the target references of a scheme
pub trait SchemeLinting: Send + Sync {
    fn lint(&self, scheme: &Scheme, lookup: &dyn TargetLookup) -> Vec<LintingIssue>;
}

/// Validates a project and everything it owns
pub trait ProjectLinting: Send + Sync {
    fn lint(&self, project: &Project) -> Vec<LintingIssue>;
}

/// Validates a whole graph
pub trait GraphLinting: Send + Sync {
    fn lint(&self, graph: &Graph) -> Vec<LintingIssue>;
}
