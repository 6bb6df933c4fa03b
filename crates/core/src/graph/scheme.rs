use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reference to a target by the path of its project and its name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TargetReference {
    pub project_path: PathBuf,
    pub name: String,
}

impl TargetReference {
    pub fn new(project_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BuildAction {
    #[serde(default)]
    pub targets: Vec<TargetReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TestAction {
    #[serde(default)]
    pub targets: Vec<TargetReference>,
    /// Build configuration the tests run with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Scheme {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_action: Option<BuildAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_action: Option<TestAction>,
}

impl Scheme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            build_action: None,
            test_action: None,
        }
    }

    pub fn with_build_targets(mut self, targets: Vec<TargetReference>) -> Self {
        self.build_action = Some(BuildAction { targets });
        self
    }

    pub fn with_test_targets(mut self, targets: Vec<TargetReference>) -> Self {
        let action = self.test_action.get_or_insert_with(TestAction::default);
        action.targets = targets;
        self
    }

    pub fn with_test_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.test_action
            .get_or_insert_with(TestAction::default)
            .configuration = Some(configuration.into());
        self
    }

    pub fn build_targets(&self) -> &[TargetReference] {
        self.build_action
            .as_ref()
            .map(|action| action.targets.as_slice())
            .unwrap_or_default()
    }

    pub fn test_targets(&self) -> &[TargetReference] {
        self.test_action
            .as_ref()
            .map(|action| action.targets.as_slice())
            .unwrap_or_default()
    }

    pub fn is_buildable(&self) -> bool {
        !self.build_targets().is_empty()
    }

    pub fn is_testable(&self) -> bool {
        !self.test_targets().is_empty()
    }

    /// Names of the test-action targets in declaration order
    pub fn test_target_names(&self) -> Vec<&str> {
        self.test_targets()
            .iter()
            .map(|reference| reference.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_actions_are_not_buildable() {
        let absent = Scheme::new("A");
        let empty = Scheme::new("B").with_build_targets(vec![]);
        let built = Scheme::new("C").with_build_targets(vec![TargetReference::new("/p", "App")]);

        assert!(!absent.is_buildable());
        assert!(!empty.is_buildable());
        assert!(built.is_buildable());
        assert!(!built.is_testable());
    }

    #[test]
    fn test_test_target_names_keep_order() {
        let scheme = Scheme::new("Tests").with_test_targets(vec![
            TargetReference::new("/p", "BTests"),
            TargetReference::new("/p", "ATests"),
        ]);

        assert_eq!(scheme.test_target_names(), vec!["BTests", "ATests"]);
    }

    #[test]
    fn test_test_action_json_lists_references() {
        let scheme: Scheme = serde_json::from_str(
            r#"{
                "name": "AppTests",
                "test_action": {
                    "targets": [{ "project_path": "/p", "name": "AppTests" }],
                    "configuration": "Debug"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(scheme.test_targets(), &[TargetReference::new("/p", "AppTests")]);
        assert!(scheme.build_action.is_none());
    }

    #[test]
    fn test_test_configuration_keeps_targets() {
        let scheme = Scheme::new("Tests")
            .with_test_targets(vec![TargetReference::new("/p", "ATests")])
            .with_test_configuration("Debug");

        let action = scheme.test_action.unwrap();
        assert_eq!(action.targets.len(), 1);
        assert_eq!(action.configuration.as_deref(), Some("Debug"));
    }
}
