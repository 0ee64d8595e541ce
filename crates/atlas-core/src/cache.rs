// crates/atlas-core/src/cache.rs

//! Time-boxed result cache.
//!
//! Entries are checked on read (an expired entry is never returned) and
//! expired entries are swept whenever a new one is stored, so a stream of
//! distinct keys cannot grow the map without bound.

use crate::clock::{Clock, SystemClock};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Logical cache key of a facade query.
///
/// Renders as `allCountries`, `allStates`, `country:<code>` or
/// `states:<code>`; each code gets its own entry and its own expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKey<'a> {
    AllCountries,
    Country(&'a str),
    AllStates,
    StatesOf(&'a str),
}

impl fmt::Display for QueryKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::AllCountries => f.write_str("allCountries"),
            QueryKey::Country(code) => write!(f, "country:{code}"),
            QueryKey::AllStates => f.write_str("allStates"),
            QueryKey::StatesOf(code) => write!(f, "states:{code}"),
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Duration,
}

impl<V> Entry<V> {
    fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) < self.ttl
    }
}

pub struct ResultCache<V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> ResultCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the live value for `key`, or runs `compute` once and stores
    /// its result with the default TTL.
    pub fn get_or_compute(&self, key: &str, compute: impl FnOnce() -> V) -> V {
        self.get_or_compute_with_ttl(key, self.ttl, compute)
    }

    pub fn get_or_compute_with_ttl(
        &self,
        key: &str,
        ttl: Duration,
        compute: impl FnOnce() -> V,
    ) -> V {
        // The lock is held across `compute` so racing callers for the same
        // key wait for the first result instead of computing it again.
        let mut entries = self.entries.lock();
        let now = self.clock.now();

        if let Some(entry) = entries.get(key) {
            if entry.is_live(now) {
                tracing::trace!(key, "cache hit");
                return entry.value.clone();
            }
        }

        tracing::trace!(key, "cache miss");
        let value = compute();
        entries.retain(|_, e| e.is_live(now));
        entries.insert(
            key.to_string(),
            Entry {
                value: value.clone(),
                inserted_at: now,
                ttl,
            },
        );
        value
    }

    /// The live value for `key`, without computing anything.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .lock()
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone())
    }

    /// Drops every expired entry; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl<V> fmt::Debug for ResultCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::Cell;

    fn cache(ttl_secs: u64) -> (ResultCache<Vec<u32>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = ResultCache::with_clock(Duration::from_secs(ttl_secs), clock.clone());
        (cache, clock)
    }

    #[test]
    fn keys_render_like_the_query() {
        assert_eq!(QueryKey::AllCountries.to_string(), "allCountries");
        assert_eq!(QueryKey::AllStates.to_string(), "allStates");
        assert_eq!(QueryKey::Country("US").to_string(), "country:US");
        assert_eq!(QueryKey::StatesOf("FR").to_string(), "states:FR");
    }

    #[test]
    fn live_entry_skips_compute() {
        let (cache, clock) = cache(10);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            vec![1, 2, 3]
        };

        assert_eq!(cache.get_or_compute("k", compute), vec![1, 2, 3]);
        clock.advance(Duration::from_secs(9));
        assert_eq!(cache.get_or_compute("k", compute), vec![1, 2, 3]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn expired_entry_is_recomputed() {
        let (cache, clock) = cache(10);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            vec![calls.get()]
        };

        assert_eq!(cache.get_or_compute("k", compute), vec![1]);
        clock.advance(Duration::from_secs(10));
        assert!(cache.get("k").is_none());
        assert_eq!(cache.get_or_compute("k", compute), vec![2]);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn empty_results_are_cached() {
        let (cache, _clock) = cache(10);
        let calls = Cell::new(0);
        for _ in 0..3 {
            let v = cache.get_or_compute("states:ZZ", || {
                calls.set(calls.get() + 1);
                Vec::new()
            });
            assert!(v.is_empty());
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn distinct_keys_expire_independently() {
        let (cache, clock) = cache(10);
        cache.get_or_compute("country:US", || vec![1]);
        clock.advance(Duration::from_secs(6));
        cache.get_or_compute("country:FR", || vec![2]);
        clock.advance(Duration::from_secs(5));

        assert!(cache.get("country:US").is_none());
        assert_eq!(cache.get("country:FR"), Some(vec![2]));
    }

    #[test]
    fn inserts_sweep_expired_entries() {
        let (cache, clock) = cache(1);
        for i in 0..50u32 {
            cache.get_or_compute(&format!("country:{i}"), || vec![i]);
        }
        assert_eq!(cache.len(), 50);
        clock.advance(Duration::from_secs(2));
        cache.get_or_compute("country:fresh", || vec![0]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn per_call_ttl_overrides_default() {
        let (cache, clock) = cache(100);
        cache.get_or_compute_with_ttl("short", Duration::from_secs(1), || vec![1]);
        cache.get_or_compute("long", || vec![2]);
        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.get("long"), Some(vec![2]));
    }

    #[test]
    fn racing_callers_compute_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let cache = Arc::new(ResultCache::<Vec<u32>>::new(Duration::from_secs(60)));
        let computed = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let computed = Arc::clone(&computed);
                std::thread::spawn(move || {
                    cache.get_or_compute("country:US", || {
                        computed.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(Duration::from_millis(20));
                        vec![1]
                    })
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), vec![1]);
        }
        assert_eq!(computed.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }
}
