use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAMES: [&str; 2] = [".forge.json", "forge.json"];

/// Settings that tune how the inspector recognizes generated artifacts.
///
/// Every field is optional in the JSON file; missing fields keep their
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ForgeConfig {
    /// File placed inside a workspace bundle by the generator
    pub generated_marker: String,
    /// Extension of workspace bundles, without the leading dot
    pub workspace_extension: String,
    /// Suffix appended to the workspace name for aggregate project schemes
    pub project_scheme_suffix: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            generated_marker: ".forge-generated".to_string(),
            workspace_extension: "xcworkspace".to_string(),
            project_scheme_suffix: "-Project".to_string(),
        }
    }
}

impl ForgeConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walks up from `start_path` looking for `.forge.json` or `forge.json`
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Loads the nearest config file, or the defaults when there is none
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => {
                tracing::debug!("Loading forge config from {:?}", path);
                Self::load_from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Name fragment identifying the aggregate schemes of `workspace_name`
    pub fn project_scheme_pattern(&self, workspace_name: &str) -> String {
        format!("{}{}", workspace_name, self.project_scheme_suffix)
    }
}
