// crates/atlas-core/src/options.rs
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Behaviour switches for an [`Atlas`](crate::Atlas).
///
/// Deserializes from camelCase keys (`useMap`, `cacheResults`,
/// `cacheDuration`), so an options file such as
/// `{"useMap": true, "cacheResults": true, "cacheDuration": 60}` works as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtlasOptions {
    /// Load the corpus and build indexes in [`Atlas::new`](crate::Atlas::new).
    pub preload: bool,
    /// Answer lookups from hash indexes; `false` scans the corpus every call.
    pub use_map: bool,
    /// Keep query results in the TTL cache.
    pub cache_results: bool,
    /// Cache TTL in seconds.
    pub cache_duration: u64,
    /// Remember by-code lookups for the lifetime of the instance.
    pub memoize: bool,
}

impl Default for AtlasOptions {
    fn default() -> Self {
        Self {
            preload: false,
            use_map: true,
            cache_results: false,
            cache_duration: 3600,
            memoize: false,
        }
    }
}

impl AtlasOptions {
    pub fn with_preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }

    pub fn with_use_map(mut self, use_map: bool) -> Self {
        self.use_map = use_map;
        self
    }

    /// Enables the result cache with the given TTL in seconds.
    pub fn with_cache(mut self, seconds: u64) -> Self {
        self.cache_results = true;
        self.cache_duration = seconds;
        self
    }

    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_duration)
    }
}

#[cfg(feature = "json")]
impl AtlasOptions {
    pub fn from_json_str(s: &str) -> crate::Result<Self> {
        serde_json::from_str(s).map_err(|e| crate::AtlasError::InvalidConfig(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|e| {
            crate::AtlasError::InvalidConfig(format!("{}: {e}", path.display()))
        })?;
        Self::from_json_str(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let o = AtlasOptions::default();
        assert!(o.use_map);
        assert!(!o.cache_results);
        assert_eq!(o.cache_ttl(), Duration::from_secs(3600));
    }

    #[cfg(feature = "json")]
    #[test]
    fn camel_case_file_with_missing_keys() {
        let o = AtlasOptions::from_json_str(r#"{"cacheResults": true, "cacheDuration": 5}"#).unwrap();
        assert!(o.cache_results);
        assert_eq!(o.cache_duration, 5);
        assert!(o.use_map);
        assert!(!o.preload);
    }

    #[cfg(feature = "json")]
    #[test]
    fn garbage_is_invalid_config() {
        let err = AtlasOptions::from_json_str("{useMap: yes}").unwrap_err();
        assert!(matches!(err, crate::AtlasError::InvalidConfig(_)));
    }
}
