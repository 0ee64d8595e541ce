// crates/atlas-core/src/memo.rs
use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;

/// Never-expiring store of computed results, keyed by the typed argument.
///
/// Unlike [`ResultCache`](crate::cache::ResultCache) nothing is ever evicted,
/// so only use it over a small, finite argument domain such as country codes.
#[derive(Debug)]
pub struct Memoizer<K, V> {
    store: Mutex<HashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> Memoizer<K, V> {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the stored value for `key`, computing and storing it on first use.
    pub fn get_or_compute(&self, key: K, f: impl FnOnce(&K) -> V) -> V {
        let mut store = self.store.lock();
        if let Some(v) = store.get(&key) {
            return v.clone();
        }
        let value = f(&key);
        store.insert(key, value.clone());
        value
    }

    pub fn contains(&self, key: &K) -> bool {
        self.store.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}

impl<K: Eq + Hash, V: Clone> Default for Memoizer<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps a pure function so each distinct argument is computed only once.
pub fn memoize<K, V, F>(f: F) -> impl Fn(K) -> V
where
    K: Eq + Hash,
    V: Clone,
    F: Fn(&K) -> V,
{
    let memo = Memoizer::new();
    move |key| memo.get_or_compute(key, &f)
}
