use std::sync::Arc;

use super::target_linter::dependency_issues;
use super::{LintingIssue, ProjectLinter, SchemeLinter};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::graph::{Graph, TargetDependency};
use crate::interfaces::{GraphLinting, ProjectLinting, SchemeLinting};

/// Lints every project of a graph, the workspace schemes, and the
/// references that cross project boundaries.
pub struct GraphLinter {
    project_linter: Box<dyn ProjectLinting>,
    scheme_linter: Box<dyn SchemeLinting>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for GraphLinter {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl GraphLinter {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self::with_linters(
            Box::new(ProjectLinter::new()),
            Box::new(SchemeLinter::new()),
            sink,
        )
    }

    pub fn with_linters(
        project_linter: Box<dyn ProjectLinting>,
        scheme_linter: Box<dyn SchemeLinting>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            project_linter,
            scheme_linter,
            sink,
        }
    }

    fn lint_cross_project_dependencies(&self, graph: &Graph) -> Vec<LintingIssue> {
        let mut issues = Vec::new();

        for node in graph.all_targets() {
            for dependency in &node.target.dependencies {
                let TargetDependency::Project { target, path } = dependency else {
                    continue;
                };
                if path == &node.project.path {
                    continue;
                }
                match graph.target(path, target) {
                    Some(found) => issues.extend(dependency_issues(node.target, found.target)),
                    None => issues.push(LintingIssue::error(format!(
                        "Target '{}' depends on '{}' which doesn't exist in project at {}.",
                        node.target.name,
                        target,
                        path.display()
                    ))),
                }
            }
        }

        issues
    }

    /// Project schemes may point into other projects; the project linter
    /// leaves those references alone.
    fn lint_cross_project_scheme_references(&self, graph: &Graph) -> Vec<LintingIssue> {
        let mut issues = Vec::new();

        for project in graph.projects.values() {
            for scheme in &project.schemes {
                let references = scheme
                    .build_targets()
                    .iter()
                    .chain(scheme.test_targets());
                for reference in references {
                    if reference.project_path == project.path {
                        continue;
                    }
                    if graph.target(&reference.project_path, &reference.name).is_none() {
                        issues.push(LintingIssue::error(format!(
                            "The target '{}' referenced by scheme '{}' doesn't exist in project at {}.",
                            reference.name,
                            scheme.name,
                            reference.project_path.display()
                        )));
                    }
                }
            }
        }

        issues
    }

    fn lint_entry_nodes(&self, graph: &Graph) -> Vec<LintingIssue> {
        graph
            .entry_nodes
            .iter()
            .filter(|reference| graph.target(&reference.project_path, &reference.name).is_none())
            .map(|reference| {
                LintingIssue::error(format!(
                    "The entry target '{}' doesn't exist in project at {}.",
                    reference.name,
                    reference.project_path.display()
                ))
            })
            .collect()
    }
}

impl GraphLinting for GraphLinter {
    fn lint(&self, graph: &Graph) -> Vec<LintingIssue> {
        let mut issues = Vec::new();

        for project in graph.projects.values() {
            self.sink
                .debug(&format!("Linting project at {}", project.path.display()));
            issues.extend(self.project_linter.lint(project));
        }

        for scheme in &graph.workspace.schemes {
            issues.extend(self.scheme_linter.lint(scheme, graph));
        }

        issues.extend(self.lint_cross_project_dependencies(graph));
        issues.extend(self.lint_cross_project_scheme_references(graph));
        issues.extend(self.lint_entry_nodes(graph));

        let errors = issues.iter().filter(|issue| issue.is_error()).count();
        self.sink.debug(&format!(
            "Linted {} projects: {} errors, {} warnings",
            graph.projects.len(),
            errors,
            issues.len() - errors
        ));

        issues
    }
}
