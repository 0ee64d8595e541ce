//! Workspace umbrella crate: re-exports [`atlas_core`] so the demos under
//! `demos/` can be run from the repository root.
pub use atlas_core::*;
