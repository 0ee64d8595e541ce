// crates/atlas-core/src/lib.rs

//! # atlas-core
//!
//! Read-only lookups over an immutable corpus of countries and their states.
//!
//! The corpus is fetched once from a [`DatasetSource`], lookup indexes are
//! derived from it on first need, and results can additionally go through a
//! TTL [`ResultCache`](cache::ResultCache) and a never-expiring
//! [`Memoizer`](memo::Memoizer). See [`Atlas`] for the query surface and
//! [`AtlasOptions`] for the switches.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod atlas;
pub mod cache;
pub mod clock;
pub mod common;
pub mod error;
pub mod index;
pub mod loader; // The public loader
pub mod memo;
pub mod model;
pub mod options;

// Re-exports
pub use crate::atlas::Atlas;
pub use crate::common::DbStats;
pub use crate::error::{AtlasError, Result};
#[cfg(feature = "json")]
pub use crate::loader::JsonSource;
pub use crate::loader::{DatasetLoader, DatasetSource, FnSource, SnapshotSource, StaticSource};
pub use crate::model::{Country, Dataset, State, Timezone};
pub use crate::options::AtlasOptions;
