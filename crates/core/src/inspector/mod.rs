//! Read-only queries over the build graph

mod build_argument;
mod build_graph_inspector;

pub use build_argument::{BuildArgument, to_command_line};
pub use build_graph_inspector::BuildGraphInspector;
