use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{GraphTarget, Scheme, Settings, Target, TargetLookup};

/// A named collection of targets and schemes, identified by its path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Project {
    pub path: PathBuf,
    pub name: String,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub schemes: Vec<Scheme>,
}

impl Project {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            targets: Vec::new(),
            settings: Settings::default(),
            schemes: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.schemes.push(scheme);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// First target declared with `name`
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|target| target.name == name)
    }
}

/// A project only resolves references to its own targets
impl TargetLookup for Project {
    fn lookup(&self, path: &Path, name: &str) -> Option<GraphTarget<'_>> {
        if path != self.path.as_path() {
            return None;
        }
        self.target(name).map(|target| GraphTarget {
            project: self,
            target,
        })
    }

    fn covers(&self, path: &Path) -> bool {
        path == self.path.as_path()
    }
}
