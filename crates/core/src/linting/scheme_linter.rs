use super::LintingIssue;
use crate::graph::{Scheme, TargetLookup, TargetReference};
use crate::interfaces::SchemeLinting;

/// Checks that a scheme only references targets that exist
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemeLinter;

impl SchemeLinter {
    pub fn new() -> Self {
        Self
    }

    fn lint_references<'a>(
        &self,
        scheme: &Scheme,
        action: &str,
        references: impl Iterator<Item = &'a TargetReference>,
        lookup: &dyn TargetLookup,
    ) -> Vec<LintingIssue> {
        references
            .filter(|reference| lookup.covers(&reference.project_path))
            .filter(|reference| lookup.resolve(reference).is_none())
            .map(|reference| {
                LintingIssue::error(format!(
                    "The target '{}' referenced by the {} action of scheme '{}' doesn't exist in project at {}.",
                    reference.name,
                    action,
                    scheme.name,
                    reference.project_path.display()
                ))
            })
            .collect()
    }

    fn lint_has_targets(&self, scheme: &Scheme) -> Vec<LintingIssue> {
        if scheme.is_buildable() || scheme.is_testable() {
            return Vec::new();
        }
        vec![LintingIssue::warning(format!(
            "The scheme '{}' has no targets to build or test.",
            scheme.name
        ))]
    }

    fn lint_test_configuration(
        &self,
        scheme: &Scheme,
        lookup: &dyn TargetLookup,
    ) -> Vec<LintingIssue> {
        let Some(configuration) = scheme
            .test_action
            .as_ref()
            .and_then(|action| action.configuration.as_deref())
        else {
            return Vec::new();
        };

        let resolved = scheme
            .test_targets()
            .iter()
            .find_map(|reference| lookup.resolve(reference));

        match resolved {
            Some(found)
                if found
                    .target
                    .effective_settings(found.project)
                    .configuration(configuration)
                    .is_none() =>
            {
                vec![LintingIssue::error(format!(
                    "The build configuration '{}' specified in the test action of scheme '{}' isn't defined by target '{}'.",
                    configuration, scheme.name, found.target.name
                ))]
            }
            _ => Vec::new(),
        }
    }
}

impl SchemeLinting for SchemeLinter {
    fn lint(&self, scheme: &Scheme, lookup: &dyn TargetLookup) -> Vec<LintingIssue> {
        let mut issues = Vec::new();
        issues.extend(self.lint_references(
            scheme,
            "build",
            scheme.build_targets().iter(),
            lookup,
        ));
        issues.extend(self.lint_references(
            scheme,
            "test",
            scheme.test_targets().iter(),
            lookup,
        ));
        issues.extend(self.lint_has_targets(scheme));
        issues.extend(self.lint_test_configuration(scheme, lookup));
        issues
    }
}
