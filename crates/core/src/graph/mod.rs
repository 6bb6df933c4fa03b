//! In-memory dependency graph
//!
//! The graph is produced by the manifest mapping pipeline and handed to
//! forge as a finished value. Nothing in this crate mutates it: linters and
//! the inspector only borrow it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

mod platform;
mod product;
mod project;
mod scheme;
mod settings;
mod target;

pub use platform::Platform;
pub use product::Product;
pub use project::Project;
pub use scheme::{BuildAction, Scheme, TargetReference, TestAction};
pub use settings::{
    BuildConfiguration, Configuration, ConfigurationEntry, SettingValue, Settings,
    SettingsDictionary, Variant,
};
pub use target::{Target, TargetDependency};

/// A target together with the project that owns it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphTarget<'a> {
    pub project: &'a Project,
    pub target: &'a Target,
}

/// Resolves `(project path, target name)` pairs
pub trait TargetLookup {
    fn lookup(&self, path: &Path, name: &str) -> Option<GraphTarget<'_>>;

    /// Whether references into the project at `path` can be answered here
    fn covers(&self, _path: &Path) -> bool {
        true
    }

    fn resolve(&self, reference: &TargetReference) -> Option<GraphTarget<'_>> {
        self.lookup(&reference.project_path, &reference.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Workspace {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub projects: Vec<PathBuf>,
    #[serde(default)]
    pub schemes: Vec<Scheme>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            projects: Vec::new(),
            schemes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Graph {
    pub name: String,
    pub path: PathBuf,
    pub workspace: Workspace,
    #[serde(default)]
    pub projects: BTreeMap<PathBuf, Project>,
    /// Targets explicitly requested as build roots
    #[serde(default)]
    pub entry_nodes: Vec<TargetReference>,
}

impl Graph {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            name: workspace.name.clone(),
            path: workspace.path.clone(),
            workspace,
            projects: BTreeMap::new(),
            entry_nodes: Vec::new(),
        }
    }

    /// Adds a project, registering it with the workspace
    pub fn with_project(mut self, project: Project) -> Self {
        if !self.workspace.projects.contains(&project.path) {
            self.workspace.projects.push(project.path.clone());
        }
        self.projects.insert(project.path.clone(), project);
        self
    }

    pub fn with_workspace_scheme(mut self, scheme: Scheme) -> Self {
        self.workspace.schemes.push(scheme);
        self
    }

    pub fn with_entry_node(mut self, reference: TargetReference) -> Self {
        self.entry_nodes.push(reference);
        self
    }

    /// Parses a graph, rejecting projects whose map key differs from their
    /// own path
    pub fn from_json(json: &str) -> Result<Self> {
        let graph: Self = serde_json::from_str(json)?;
        for (key, project) in &graph.projects {
            if key != &project.path {
                return Err(Error::ConfigError(format!(
                    "Project registered at {} declares path {}",
                    key.display(),
                    project.path.display()
                )));
            }
        }
        Ok(graph)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn project(&self, path: &Path) -> Option<&Project> {
        self.projects.get(path)
    }

    /// Looks a target up by the path of its project and its name
    pub fn target(&self, path: &Path, name: &str) -> Option<GraphTarget<'_>> {
        let project = self.projects.get(path)?;
        let target = project.target(name)?;
        Some(GraphTarget { project, target })
    }

    /// Every target, projects ordered by path and targets in declaration order
    pub fn all_targets(&self) -> impl Iterator<Item = GraphTarget<'_>> {
        self.projects.values().flat_map(|project| {
            project
                .targets
                .iter()
                .map(move |target| GraphTarget { project, target })
        })
    }

    /// Project schemes (projects ordered by path) followed by workspace schemes
    pub fn schemes(&self) -> impl Iterator<Item = &Scheme> {
        self.projects
            .values()
            .flat_map(|project| project.schemes.iter())
            .chain(self.workspace.schemes.iter())
    }

    /// Projects owning at least one entry node, ordered by path
    pub fn entry_projects(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = Vec::new();
        for reference in &self.entry_nodes {
            let Some(project) = self.projects.get(&reference.project_path) else {
                continue;
            };
            if !projects.iter().any(|p| p.path == project.path) {
                projects.push(project);
            }
        }
        projects.sort_by(|a, b| a.path.cmp(&b.path));
        projects
    }
}

impl TargetLookup for Graph {
    fn lookup(&self, path: &Path, name: &str) -> Option<GraphTarget<'_>> {
        self.target(path, name)
    }
}
