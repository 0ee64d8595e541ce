// crates/atlas-core/src/loader/memory.rs
use super::DatasetSource;
use crate::error::Result;
use crate::model::Dataset;

/// A corpus already held in memory. Each fetch hands out a clone.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    data: Dataset,
}

impl StaticSource {
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }
}

impl From<Dataset> for StaticSource {
    fn from(data: Dataset) -> Self {
        Self::new(data)
    }
}

impl DatasetSource for StaticSource {
    fn fetch(&self) -> Result<Dataset> {
        Ok(self.data.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// Adapts any `Fn() -> Result<Dataset>` into a source.
pub struct FnSource<F> {
    f: F,
}

impl<F> FnSource<F>
where
    F: Fn() -> Result<Dataset> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> DatasetSource for FnSource<F>
where
    F: Fn() -> Result<Dataset> + Send + Sync,
{
    fn fetch(&self) -> Result<Dataset> {
        (self.f)()
    }

    fn describe(&self) -> String {
        "fn".to_string()
    }
}
