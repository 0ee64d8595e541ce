use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for an [`Atlas`](crate::Atlas).
///
/// Returned by [`Atlas::stats`](crate::Atlas::stats). `indexed_codes` stays
/// zero until the country index has been built (it never is with
/// `use_map = false`); `cached_entries` includes expired entries that have
/// not been swept yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub states: usize,
    pub indexed_codes: usize,
    pub cached_entries: usize,
}
