use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::LintingIssue;
use crate::graph::{Platform, Product, Project, Target, TargetDependency};
use crate::interfaces::TargetLinting;

const RESERVED_NAME_CHARACTERS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

static BUILD_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\([^)]*\)|\$\{[^}]*\}").expect("Invalid build variable regex")
});

static BUNDLE_ID_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("Invalid bundle id regex"));

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+){0,2}$").expect("Invalid version regex"));

/// Checks the internal consistency of a single target
#[derive(Debug, Default, Clone, Copy)]
pub struct TargetLinter;

impl TargetLinter {
    pub fn new() -> Self {
        Self
    }

    fn lint_name(&self, target: &Target) -> Vec<LintingIssue> {
        if target.name.trim().is_empty() {
            return vec![LintingIssue::error(format!(
                "A target with bundle identifier '{}' has an empty name.",
                target.bundle_id
            ))];
        }

        let unsafe_name = target.name == "."
            || target.name == ".."
            || target
                .name
                .chars()
                .any(|c| c.is_control() || RESERVED_NAME_CHARACTERS.contains(&c));

        if unsafe_name {
            vec![LintingIssue::error(format!(
                "Target name '{}' contains characters that are not allowed in file names.",
                target.name
            ))]
        } else {
            Vec::new()
        }
    }

    fn lint_product_platform(&self, target: &Target) -> Vec<LintingIssue> {
        if target.platform.supports(target.product) {
            return Vec::new();
        }
        vec![LintingIssue::error(format!(
            "Target '{}' has product '{}' which is not supported on {}.",
            target.name, target.product, target.platform
        ))]
    }

    fn lint_bundle_id(&self, target: &Target) -> Vec<LintingIssue> {
        if target.bundle_id.is_empty() {
            return vec![LintingIssue::error(format!(
                "Target '{}' has an empty bundle identifier.",
                target.name
            ))];
        }

        let expanded = BUILD_VARIABLE.replace_all(&target.bundle_id, "variable");
        let well_formed = expanded
            .split('.')
            .all(|segment| BUNDLE_ID_SEGMENT.is_match(segment));

        if well_formed {
            Vec::new()
        } else {
            vec![LintingIssue::error(format!(
                "Invalid bundle identifier '{}' for target '{}'. Bundle identifiers may only contain alphanumerics, hyphens and dots, and no segment may be empty.",
                target.bundle_id, target.name
            ))]
        }
    }

    fn lint_deployment_target(&self, target: &Target) -> Vec<LintingIssue> {
        match &target.deployment_target {
            Some(version) if !VERSION.is_match(version) => vec![LintingIssue::error(format!(
                "Target '{}' declares an invalid deployment target '{}'. Expected a version like 17.0.",
                target.name, version
            ))],
            _ => Vec::new(),
        }
    }

    fn lint_sources(&self, target: &Target) -> Vec<LintingIssue> {
        if target.product.compiles_sources() && target.sources.is_empty() {
            vec![LintingIssue::warning(format!(
                "The target '{}' doesn't contain source files.",
                target.name
            ))]
        } else {
            Vec::new()
        }
    }

    fn lint_dependencies(&self, target: &Target, project: &Project) -> Vec<LintingIssue> {
        let mut issues = Vec::new();
        let mut seen: HashSet<&TargetDependency> = HashSet::new();
        let mut reported: HashSet<&TargetDependency> = HashSet::new();

        for dependency in &target.dependencies {
            if !seen.insert(dependency) {
                if reported.insert(dependency) {
                    issues.push(LintingIssue::warning(format!(
                        "Target '{}' declares the dependency '{}' more than once.",
                        target.name,
                        dependency.name()
                    )));
                }
                continue;
            }

            // Other projects are resolved by the graph linter
            if dependency.project_path(&project.path) != project.path.as_path() {
                continue;
            }

            match project.target(dependency.name()) {
                Some(dependency_target) => {
                    issues.extend(dependency_issues(target, dependency_target));
                }
                None => issues.push(LintingIssue::error(format!(
                    "Target '{}' depends on '{}' which doesn't exist in project at {}.",
                    target.name,
                    dependency.name(),
                    project.path.display()
                ))),
            }
        }

        issues
    }
}

impl TargetLinting for TargetLinter {
    fn lint(&self, target: &Target, project: Option<&Project>) -> Vec<LintingIssue> {
        let mut issues = Vec::new();
        issues.extend(self.lint_name(target));
        issues.extend(self.lint_product_platform(target));
        issues.extend(self.lint_bundle_id(target));
        issues.extend(self.lint_deployment_target(target));
        issues.extend(self.lint_sources(target));
        if let Some(project) = project {
            issues.extend(self.lint_dependencies(target, project));
        }
        issues
    }
}

/// Platform and product-link rules between a target and a resolved dependency
pub(crate) fn dependency_issues(target: &Target, dependency: &Target) -> Vec<LintingIssue> {
    let mut issues = Vec::new();

    if !platforms_compatible(target, dependency) {
        issues.push(LintingIssue::error(format!(
            "Target '{}' ({}) depends on '{}' ({}) which is built for an incompatible platform.",
            target.name, target.platform, dependency.name, dependency.platform
        )));
    }

    if !target.product.can_depend_on(dependency.product) {
        issues.push(LintingIssue::error(format!(
            "Target '{}' of product '{}' cannot depend on '{}' of product '{}'.",
            target.name, target.product, dependency.name, dependency.product
        )));
    }

    issues
}

fn platforms_compatible(target: &Target, dependency: &Target) -> bool {
    if target.platform == dependency.platform {
        return true;
    }
    // Host apps embed their watch companion
    target.product == Product::App
        && target.platform == Platform::Ios
        && dependency.product == Product::WatchApplication
        && dependency.platform == Platform::Watchos
}
