//! Service implementations
//!
//! Concrete implementations of the interface traits that touch the outside
//! world.

pub mod local_file_system;

pub use local_file_system::LocalFileSystem;
