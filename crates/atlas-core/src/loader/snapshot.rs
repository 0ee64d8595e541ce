// crates/atlas-core/src/loader/snapshot.rs
use super::common_io;
use super::DatasetSource;
use crate::error::Result;
use crate::model::Dataset;
use bincode::Options;
use std::path::{Path, PathBuf};

/// Refuse snapshots that would decode to more than this many bytes.
const SNAPSHOT_LIMIT: u64 = 256 * 1024 * 1024;

fn codec() -> impl Options {
    bincode::DefaultOptions::new().with_limit(SNAPSHOT_LIMIT)
}

pub(crate) fn read_snapshot(path: &Path) -> Result<Dataset> {
    let reader = common_io::open_stream(path)?;
    Ok(codec().deserialize_from(reader)?)
}

pub(crate) fn write_snapshot(path: &Path, data: &Dataset) -> Result<()> {
    let mut writer = common_io::create_stream(path)?;
    codec().serialize_into(&mut writer, data)?;
    writer.finish()
}

impl Dataset {
    /// Writes the corpus as a bincode snapshot (gzipped if `path` ends in `.gz`).
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        write_snapshot(path.as_ref(), self)
    }

    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        read_snapshot(path.as_ref())
    }
}

/// Reads the corpus from a snapshot written by [`Dataset::save_snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for SnapshotSource {
    fn fetch(&self) -> Result<Dataset> {
        read_snapshot(&self.path)
    }

    fn describe(&self) -> String {
        format!("snapshot({})", self.path.display())
    }
}
