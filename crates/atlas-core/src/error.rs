// crates/atlas-core/src/error.rs
use thiserror::Error;

/// Errors produced by the atlas data-access layer.
///
/// Only dataset loading (and options parsing) can fail. An unknown code is
/// not an error: lookups answer `Ok(None)` or an empty `Vec` instead.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The dataset source could not be read or parsed.
    ///
    /// The owning [`Atlas`](crate::Atlas) stays retryable: the next query
    /// attempts the load again.
    #[error("dataset unavailable from {source_desc}: {reason}")]
    DataUnavailable { source_desc: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid options: {0}")]
    InvalidConfig(String),
}

impl AtlasError {
    pub fn data_unavailable(source_desc: impl Into<String>, reason: impl ToString) -> Self {
        AtlasError::DataUnavailable {
            source_desc: source_desc.into(),
            reason: reason.to_string(),
        }
    }

    /// `true` when the error means the corpus could not be obtained.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, AtlasError::DataUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
