//! Build graph inspection interface

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::graph::{Graph, GraphTarget, Project, Scheme, Target};
use crate::inspector::BuildArgument;

/// Read-only queries over a graph used to drive build and test invocations
pub trait BuildGraphInspecting: Send + Sync {
    /// Arguments selecting the SDK, the configuration and, optionally,
    /// disabling code signing for `target`
    fn build_arguments(
        &self,
        project: &Project,
        target: &Target,
        configuration: Option<&str>,
        skip_signing: bool,
    ) -> Vec<BuildArgument>;

    /// Target of the first build-action reference of `scheme`
    fn buildable_target<'g>(&self, scheme: &Scheme, graph: &'g Graph) -> Option<GraphTarget<'g>>;

    /// Target of the first test-action reference of `scheme`
    fn testable_target<'g>(&self, scheme: &Scheme, graph: &'g Graph) -> Option<GraphTarget<'g>>;

    /// Schemes that build at least one target, sorted by name
    fn buildable_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme>;

    /// Buildable schemes of the projects owning the graph's entry nodes
    fn buildable_entry_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme>;

    /// Schemes that test at least one target, sorted by name
    fn testable_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme>;

    /// Schemes testing exactly one unit or UI test target, sorted by name
    fn test_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme>;

    /// Aggregate workspace schemes generated for the whole project
    fn project_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme>;

    /// First generated workspace bundle found under `directory`
    fn workspace_path(&self, directory: &Path) -> Result<Option<PathBuf>>;
}
