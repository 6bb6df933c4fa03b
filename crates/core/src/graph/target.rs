use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{Platform, Product, Project, Settings};

/// Dependency declared by a target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetDependency {
    /// A target of the same project
    Target { name: String },
    /// A target of the project at `path`
    Project { target: String, path: PathBuf },
}

impl TargetDependency {
    pub fn target(name: impl Into<String>) -> Self {
        TargetDependency::Target { name: name.into() }
    }

    pub fn project(target: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        TargetDependency::Project {
            target: target.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TargetDependency::Target { name } => name,
            TargetDependency::Project { target, .. } => target,
        }
    }

    /// Path of the project owning the dependency, given the path of the
    /// project declaring it
    pub fn project_path<'a>(&'a self, declaring_project: &'a Path) -> &'a Path {
        match self {
            TargetDependency::Target { .. } => declaring_project,
            TargetDependency::Project { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Target {
    pub name: String,
    pub product: Product,
    pub platform: Platform,
    pub bundle_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_target: Option<String>,
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    #[serde(default)]
    pub dependencies: Vec<TargetDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl Target {
    pub fn new(
        name: impl Into<String>,
        product: Product,
        platform: Platform,
        bundle_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            product,
            platform,
            bundle_id: bundle_id.into(),
            deployment_target: None,
            sources: Vec::new(),
            dependencies: Vec::new(),
            settings: None,
        }
    }

    pub fn with_sources<I, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    pub fn with_dependency(mut self, dependency: TargetDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_deployment_target(mut self, version: impl Into<String>) -> Self {
        self.deployment_target = Some(version.into());
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// The target's own settings when declared, otherwise the project's
    pub fn effective_settings<'a>(&'a self, project: &'a Project) -> &'a Settings {
        self.settings.as_ref().unwrap_or(&project.settings)
    }
}
