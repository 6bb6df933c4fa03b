//! forge - lint and inspect project dependency graphs
//!
//! Thin facade over `forge-core`, kept at the workspace root so the
//! integration tests under `tests/` exercise the public API.

pub use forge_core::*;
