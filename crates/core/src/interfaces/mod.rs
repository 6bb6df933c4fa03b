//! Core interfaces
//!
//! Every linter role, the inspector and the filesystem access used by the
//! inspector are traits, so callers can swap in their own implementations
//! and tests can substitute recording stand-ins.

pub mod build_graph_inspector;
pub mod file_system;
pub mod linting;

pub use build_graph_inspector::BuildGraphInspecting;
pub use file_system::FileSystem;
pub use linting::{GraphLinting, ProjectLinting, SchemeLinting, SettingsLinting, TargetLinting};
