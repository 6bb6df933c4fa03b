//! forge-core - Dependency graph model, linting and inspection for forge
//!
//! This crate provides functionality to:
//! - Represent projects, targets, schemes and workspaces as an immutable graph
//! - Validate that graph and report issues as data rather than failures
//! - Derive build arguments and pick the schemes/targets to build or test
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod inspector;
pub mod interfaces;
pub mod linting;
pub mod services;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use graph::{Graph, GraphTarget, Platform, Product, Project, Scheme, Settings, Target};

// Re-export main API components
pub use config::ForgeConfig;
pub use diagnostics::{DiagnosticSink, MemorySink, TracingSink};
pub use inspector::{BuildArgument, BuildGraphInspector};
pub use interfaces::{
    BuildGraphInspecting, FileSystem, GraphLinting, ProjectLinting, SchemeLinting,
    SettingsLinting, TargetLinting,
};
pub use linting::{
    GraphLinter, LintingIssue, ProjectLinter, SchemeLinter, SettingsLinter, Severity,
    TargetLinter, has_errors,
};
