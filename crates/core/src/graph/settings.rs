use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A build setting value, either a scalar or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Array(Vec<String>),
}

impl SettingValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(value) => Some(value),
            SettingValue::Array(_) => None,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

pub type SettingsDictionary = BTreeMap<String, SettingValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Debug,
    Release,
}

/// Name and kind of a build configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildConfiguration {
    pub name: String,
    pub variant: Variant,
}

impl BuildConfiguration {
    pub fn debug(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: Variant::Debug,
        }
    }

    pub fn release(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: Variant::Release,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Configuration {
    #[serde(default)]
    pub settings: SettingsDictionary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConfigurationEntry {
    pub build_configuration: BuildConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configuration>,
}

/// Build settings of a project or target.
///
/// Configurations are kept as an ordered list rather than a map, so a
/// manifest declaring the same configuration twice is representable and
/// can be reported by the settings linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    #[serde(default)]
    pub base: SettingsDictionary,
    #[serde(default)]
    pub configurations: Vec<ConfigurationEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base: SettingsDictionary::new(),
            configurations: vec![
                ConfigurationEntry {
                    build_configuration: BuildConfiguration::debug("Debug"),
                    configuration: None,
                },
                ConfigurationEntry {
                    build_configuration: BuildConfiguration::release("Release"),
                    configuration: None,
                },
            ],
            default_configuration: None,
        }
    }
}

impl Settings {
    /// Settings without any configuration
    pub fn empty() -> Self {
        Self {
            base: SettingsDictionary::new(),
            configurations: Vec::new(),
            default_configuration: None,
        }
    }

    pub fn with_configuration(
        mut self,
        build_configuration: BuildConfiguration,
        configuration: Option<Configuration>,
    ) -> Self {
        self.configurations.push(ConfigurationEntry {
            build_configuration,
            configuration,
        });
        self
    }

    pub fn with_base(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.base.insert(key.to_string(), value.into());
        self
    }

    /// First configuration entry declared with `name`
    pub fn configuration(&self, name: &str) -> Option<&ConfigurationEntry> {
        self.configurations
            .iter()
            .find(|entry| entry.build_configuration.name == name)
    }

    pub fn configuration_names(&self) -> impl Iterator<Item = &str> {
        self.configurations
            .iter()
            .map(|entry| entry.build_configuration.name.as_str())
    }

    /// Base settings overlaid with the settings of `entry`
    pub fn resolved(&self, entry: &ConfigurationEntry) -> SettingsDictionary {
        let mut resolved = self.base.clone();
        if let Some(configuration) = &entry.configuration {
            resolved.extend(
                configuration
                    .settings
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
        resolved
    }
}
