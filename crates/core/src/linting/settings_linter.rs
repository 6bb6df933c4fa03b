use std::collections::HashMap;

use super::LintingIssue;
use crate::graph::{Settings, SettingsDictionary};
use crate::interfaces::SettingsLinting;

/// Pairs of `(key, value)` settings that cannot hold at the same time
const CONTRADICTORY_SETTINGS: [((&str, &str), (&str, &str)); 2] = [
    (("CODE_SIGNING_ALLOWED", "NO"), ("CODE_SIGNING_REQUIRED", "YES")),
    (("ENABLE_HARDENED_RUNTIME", "YES"), ("CODE_SIGNING_ALLOWED", "NO")),
];

/// Checks that build configurations are declared consistently
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsLinter;

impl SettingsLinter {
    pub fn new() -> Self {
        Self
    }

    fn lint_configurations_exist(&self, settings: &Settings) -> Vec<LintingIssue> {
        if settings.configurations.is_empty() {
            vec![LintingIssue::error(
                "The settings don't declare any build configuration.",
            )]
        } else {
            Vec::new()
        }
    }

    fn lint_duplicate_configurations(&self, settings: &Settings) -> Vec<LintingIssue> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for name in settings.configuration_names() {
            *counts.entry(name).or_default() += 1;
        }

        let mut issues = Vec::new();
        let mut reported: Vec<&str> = Vec::new();
        for name in settings.configuration_names() {
            if counts[name] > 1 && !reported.contains(&name) {
                reported.push(name);
                issues.push(LintingIssue::error(format!(
                    "The build configuration '{name}' is declared more than once."
                )));
            }
        }
        issues
    }

    fn lint_default_configuration(&self, settings: &Settings) -> Vec<LintingIssue> {
        match &settings.default_configuration {
            Some(name) if settings.configuration(name).is_none() => {
                vec![LintingIssue::error(format!(
                    "The default configuration '{name}' isn't one of the declared build configurations."
                ))]
            }
            _ => Vec::new(),
        }
    }

    fn lint_contradictions(&self, settings: &Settings) -> Vec<LintingIssue> {
        let in_base = contradictions(&settings.base);
        let mut issues: Vec<LintingIssue> = in_base
            .iter()
            .map(|description| {
                LintingIssue::error(format!("The base build settings {description}."))
            })
            .collect();

        for entry in &settings.configurations {
            for description in contradictions(&settings.resolved(entry)) {
                if in_base.contains(&description) {
                    continue;
                }
                issues.push(LintingIssue::error(format!(
                    "The build settings of configuration '{}' {description}.",
                    entry.build_configuration.name
                )));
            }
        }
        issues
    }
}

fn contradictions(settings: &SettingsDictionary) -> Vec<String> {
    let holds = |(key, value): (&str, &str)| {
        settings.get(key).and_then(|v| v.as_str()) == Some(value)
    };

    CONTRADICTORY_SETTINGS
        .iter()
        .filter(|(first, second)| holds(*first) && holds(*second))
        .map(|((key_a, value_a), (key_b, value_b))| {
            format!("set {key_a}={value_a} and {key_b}={value_b}, which contradict each other")
        })
        .collect()
}

impl SettingsLinting for SettingsLinter {
    fn lint(&self, settings: &Settings) -> Vec<LintingIssue> {
        let mut issues = Vec::new();
        issues.extend(self.lint_configurations_exist(settings));
        issues.extend(self.lint_duplicate_configurations(settings));
        issues.extend(self.lint_default_configuration(settings));
        issues.extend(self.lint_contradictions(settings));
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BuildConfiguration, Configuration};

    fn lint(settings: &Settings) -> Vec<LintingIssue> {
        SettingsLinter::new().lint(settings)
    }

    fn configuration(pairs: &[(&str, &str)]) -> Option<Configuration> {
        Some(Configuration {
            settings: pairs
                .iter()
                .map(|(key, value)| (key.to_string(), (*value).into()))
                .collect(),
        })
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(lint(&Settings::default()).is_empty());
    }

    #[test]
    fn test_no_configurations() {
        assert_eq!(
            lint(&Settings::empty()),
            vec![LintingIssue::error(
                "The settings don't declare any build configuration."
            )]
        );
    }

    #[test]
    fn test_duplicate_configuration_reported_once_per_name() {
        let settings = Settings::default()
            .with_configuration(BuildConfiguration::debug("Debug"), None)
            .with_configuration(BuildConfiguration::release("Debug"), None)
            .with_configuration(BuildConfiguration::release("Release"), None);

        assert_eq!(
            lint(&settings),
            vec![
                LintingIssue::error("The build configuration 'Debug' is declared more than once."),
                LintingIssue::error("The build configuration 'Release' is declared more than once."),
            ]
        );
    }

    #[test]
    fn test_unknown_default_configuration() {
        let mut settings = Settings::default();
        settings.default_configuration = Some("Beta".to_string());
        assert_eq!(
            lint(&settings),
            vec![LintingIssue::error(
                "The default configuration 'Beta' isn't one of the declared build configurations."
            )]
        );

        settings.default_configuration = Some("Release".to_string());
        assert!(lint(&settings).is_empty());
    }

    #[test]
    fn test_contradiction_in_base_reported_once() {
        let settings = Settings::default()
            .with_base("CODE_SIGNING_ALLOWED", "NO")
            .with_base("CODE_SIGNING_REQUIRED", "YES");

        assert_eq!(
            lint(&settings),
            vec![LintingIssue::error(
                "The base build settings set CODE_SIGNING_ALLOWED=NO and CODE_SIGNING_REQUIRED=YES, which contradict each other."
            )]
        );
    }

    #[test]
    fn test_contradiction_introduced_by_configuration() {
        let settings = Settings::empty()
            .with_base("ENABLE_HARDENED_RUNTIME", "YES")
            .with_configuration(
                BuildConfiguration::debug("Debug"),
                configuration(&[("CODE_SIGNING_ALLOWED", "NO")]),
            )
            .with_configuration(BuildConfiguration::release("Release"), None);

        assert_eq!(
            lint(&settings),
            vec![LintingIssue::error(
                "The build settings of configuration 'Debug' set ENABLE_HARDENED_RUNTIME=YES and CODE_SIGNING_ALLOWED=NO, which contradict each other."
            )]
        );
    }

    #[test]
    fn test_compatible_signing_settings() {
        let settings = Settings::empty()
            .with_base("CODE_SIGNING_ALLOWED", "YES")
            .with_base("CODE_SIGNING_REQUIRED", "YES")
            .with_configuration(
                BuildConfiguration::debug("Debug"),
                configuration(&[("CODE_SIGNING_REQUIRED", "NO")]),
            );

        assert!(lint(&settings).is_empty());
    }
}
