// crates/atlas-core/src/loader/mod.rs

//! # Dataset Loader
//!
//! Obtains the corpus exactly once per owner. The physical layer (files,
//! decompression, snapshots) lives in the individual [`DatasetSource`]
//! implementations; [`DatasetLoader`] only guarantees build-once,
//! single-flight, retry-after-failure semantics.

use crate::error::{AtlasError, Result};
use crate::model::Dataset;
use once_cell::sync::OnceCell;

mod common_io;
#[cfg(feature = "json")]
mod json;
mod memory;
mod snapshot;

pub use common_io::{get_cache_path, SNAPSHOT_SUFFIX};
#[cfg(feature = "json")]
pub use json::JsonSource;
pub use memory::{FnSource, StaticSource};
pub use snapshot::SnapshotSource;

/// Where the corpus comes from.
///
/// `fetch` is called at most once per successful load; implementations may be
/// slow (disk, decompression) but must either return the whole corpus or an
/// error, never a partial one.
pub trait DatasetSource: Send + Sync {
    fn fetch(&self) -> Result<Dataset>;

    /// Human readable origin, used in logs and in `DataUnavailable`.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<S: DatasetSource + ?Sized> DatasetSource for Box<S> {
    fn fetch(&self) -> Result<Dataset> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Build-once holder for the corpus.
///
/// Concurrent first callers block on the single in-flight fetch. A failed
/// fetch leaves nothing behind, so the next call tries again.
pub struct DatasetLoader<S> {
    source: S,
    data: OnceCell<Dataset>,
}

impl<S: DatasetSource> DatasetLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            data: OnceCell::new(),
        }
    }

    /// Returns the loaded corpus, fetching it on first use.
    pub fn ensure_loaded(&self) -> Result<&Dataset> {
        self.data.get_or_try_init(|| {
            let origin = self.source.describe();
            match self.source.fetch() {
                Ok(data) => {
                    tracing::info!(
                        source = %origin,
                        countries = data.country_count(),
                        states = data.state_count(),
                        "dataset loaded"
                    );
                    Ok(data)
                }
                Err(err) => {
                    tracing::warn!(source = %origin, error = %err, "dataset load failed");
                    Err(match err {
                        e @ AtlasError::DataUnavailable { .. } => e,
                        other => AtlasError::data_unavailable(origin, other),
                    })
                }
            }
        })
    }

    /// The corpus if it has already been loaded; never triggers a fetch.
    pub fn get(&self) -> Option<&Dataset> {
        self.data.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.data.get().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
