use std::collections::HashMap;

use super::{LintingIssue, SchemeLinter, SettingsLinter, TargetLinter};
use crate::graph::{Product, Project, Target};
use crate::interfaces::{ProjectLinting, SchemeLinting, SettingsLinting, TargetLinting};

/// Runs the target, settings and scheme linters over a project, then the
/// checks that need to see every target of the project at once.
pub struct ProjectLinter {
    target_linter: Box<dyn TargetLinting>,
    settings_linter: Box<dyn SettingsLinting>,
    scheme_linter: Box<dyn SchemeLinting>,
}

impl Default for ProjectLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectLinter {
    pub fn new() -> Self {
        Self::with_linters(
            Box::new(TargetLinter::new()),
            Box::new(SettingsLinter::new()),
            Box::new(SchemeLinter::new()),
        )
    }

    pub fn with_linters(
        target_linter: Box<dyn TargetLinting>,
        settings_linter: Box<dyn SettingsLinting>,
        scheme_linter: Box<dyn SchemeLinting>,
    ) -> Self {
        Self {
            target_linter,
            settings_linter,
            scheme_linter,
        }
    }

    fn lint_duplicate_target_names(&self, project: &Project) -> Vec<LintingIssue> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for target in &project.targets {
            *counts.entry(target.name.as_str()).or_default() += 1;
        }

        let mut reported: Vec<&str> = Vec::new();
        for target in &project.targets {
            let name = target.name.as_str();
            if counts[name] > 1 && !reported.contains(&name) {
                reported.push(name);
            }
        }

        reported
            .into_iter()
            .map(|name| {
                LintingIssue::error(format!(
                    "Targets {} from project at {} have duplicates.",
                    name,
                    project.path.display()
                ))
            })
            .collect()
    }

    /// Watch apps embedded in an app, and watch extensions embedded in a
    /// watch app, must extend their parent's bundle identifier
    fn lint_companion_bundle_ids(&self, project: &Project) -> Vec<LintingIssue> {
        let mut issues = Vec::new();

        for app in project.targets.iter().filter(|t| t.product == Product::App) {
            for watch_app in local_dependencies(project, app, Product::WatchApplication) {
                if !is_bundle_id_prefixed(&app.bundle_id, &watch_app.bundle_id) {
                    issues.push(LintingIssue::error(format!(
                        "Watch app '{}' bundleId: {} isn't prefixed with its parent's app '{}' bundleId '{}'.",
                        watch_app.name, watch_app.bundle_id, app.name, app.bundle_id
                    )));
                }

                for extension in local_dependencies(project, watch_app, Product::WatchExtension) {
                    if !is_bundle_id_prefixed(&watch_app.bundle_id, &extension.bundle_id) {
                        issues.push(LintingIssue::error(format!(
                            "Watch extension '{}' bundleId: {} isn't prefixed with its parent's watch app '{}' bundleId '{}'.",
                            extension.name, extension.bundle_id, watch_app.name, watch_app.bundle_id
                        )));
                    }
                }
            }
        }

        issues
    }

    fn lint_duplicate_bundle_ids(&self, project: &Project) -> Vec<LintingIssue> {
        let mut groups: Vec<(&Target, Vec<&str>)> = Vec::new();

        for target in &project.targets {
            // Build-setting references resolve per target
            if target.bundle_id.is_empty() || target.bundle_id.contains('$') {
                continue;
            }
            let group = groups.iter_mut().find(|(first, _)| {
                first.platform == target.platform && first.bundle_id == target.bundle_id
            });
            match group {
                Some((_, names)) => {
                    if !names.contains(&target.name.as_str()) {
                        names.push(&target.name);
                    }
                }
                None => groups.push((target, vec![target.name.as_str()])),
            }
        }

        groups
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(first, names)| {
                LintingIssue::warning(format!(
                    "Targets {} from project at {} share the bundle identifier '{}' on {}.",
                    names.join(", "),
                    project.path.display(),
                    first.bundle_id,
                    first.platform
                ))
            })
            .collect()
    }
}

impl ProjectLinting for ProjectLinter {
    fn lint(&self, project: &Project) -> Vec<LintingIssue> {
        let mut issues = Vec::new();

        for target in &project.targets {
            issues.extend(self.target_linter.lint(target, Some(project)));
        }

        issues.extend(self.settings_linter.lint(&project.settings));
        for target in &project.targets {
            if let Some(settings) = &target.settings {
                issues.extend(self.settings_linter.lint(settings));
            }
        }

        for scheme in &project.schemes {
            issues.extend(self.scheme_linter.lint(scheme, project));
        }

        issues.extend(self.lint_duplicate_target_names(project));
        issues.extend(self.lint_companion_bundle_ids(project));
        issues.extend(self.lint_duplicate_bundle_ids(project));
        issues
    }
}

/// Same-project dependencies of `target` producing `product`
fn local_dependencies<'a>(
    project: &'a Project,
    target: &'a Target,
    product: Product,
) -> impl Iterator<Item = &'a Target> {
    target
        .dependencies
        .iter()
        .filter(move |dependency| dependency.project_path(&project.path) == project.path.as_path())
        .filter_map(move |dependency| project.target(dependency.name()))
        .filter(move |dependency| dependency.product == product)
}

/// `child` extends `parent` by at least one more segment
fn is_bundle_id_prefixed(parent: &str, child: &str) -> bool {
    child
        .strip_prefix(parent)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|rest| !rest.is_empty())
}
