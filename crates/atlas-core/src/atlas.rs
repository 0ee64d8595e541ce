// crates/atlas-core/src/atlas.rs
use crate::cache::{QueryKey, ResultCache};
use crate::clock::{Clock, SystemClock};
use crate::common::DbStats;
use crate::error::Result;
use crate::index::{self, CountryIndex, StateIndex};
use crate::loader::{DatasetLoader, DatasetSource};
use crate::memo::Memoizer;
use crate::model::{Country, Dataset, State};
use crate::options::AtlasOptions;
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::sync::Arc;

/// Read-only country and state lookups over a lazily loaded corpus.
///
/// Every query follows the same path: load the corpus (once), build the
/// relevant index (once, when `use_map` is on), consult the result cache and
/// the memoizer (when enabled), and only then compute from the index or by a
/// linear scan. All methods are synchronous; the first query blocks while the
/// corpus is fetched unless the instance was built with `preload`.
///
/// `Err` from any query always means the corpus could not be loaded. An
/// unknown code is `Ok(None)` or an empty `Vec`.
///
/// # Example
///
/// ```rust
/// use atlas_core::{Atlas, AtlasOptions, Country, Dataset, State, StaticSource};
///
/// let data = Dataset::new(
///     vec![Country { id: 1, iso2: "US".into(), iso3: "USA".into(), ..Default::default() }],
///     vec![State { id: 1, name: "Texas".into(), country_code: "US".into(), ..Default::default() }],
/// );
/// let atlas = Atlas::new(StaticSource::new(data), AtlasOptions::default()).unwrap();
///
/// assert_eq!(atlas.get_country_by_code("USA").unwrap().unwrap().id, 1);
/// assert_eq!(atlas.get_states_by_country("US").unwrap().len(), 1);
/// assert!(atlas.get_states_by_country("DE").unwrap().is_empty());
/// ```
pub struct Atlas<S> {
    options: AtlasOptions,
    loader: DatasetLoader<S>,
    country_index: OnceCell<CountryIndex>,
    state_index: OnceCell<StateIndex>,
    code_set: OnceCell<HashSet<String>>,
    countries_cache: Option<ResultCache<Vec<Country>>>,
    country_cache: Option<ResultCache<Option<Country>>>,
    states_cache: Option<ResultCache<Vec<State>>>,
    country_memo: Memoizer<String, Option<Country>>,
    states_memo: Memoizer<String, Vec<State>>,
}

impl<S: DatasetSource> Atlas<S> {
    /// Creates an instance. Only fails when `options.preload` is set and the
    /// corpus cannot be loaded.
    pub fn new(source: S, options: AtlasOptions) -> Result<Self> {
        Self::with_clock(source, options, Arc::new(SystemClock))
    }

    /// Like [`Atlas::new`] with an explicit time source for cache expiry.
    pub fn with_clock(source: S, options: AtlasOptions, clock: Arc<dyn Clock>) -> Result<Self> {
        let ttl = options.cache_ttl();
        let enabled = options.cache_results;

        let atlas = Self {
            loader: DatasetLoader::new(source),
            country_index: OnceCell::new(),
            state_index: OnceCell::new(),
            code_set: OnceCell::new(),
            countries_cache: enabled.then(|| ResultCache::with_clock(ttl, Arc::clone(&clock))),
            country_cache: enabled.then(|| ResultCache::with_clock(ttl, Arc::clone(&clock))),
            states_cache: enabled.then(|| ResultCache::with_clock(ttl, Arc::clone(&clock))),
            country_memo: Memoizer::new(),
            states_memo: Memoizer::new(),
            options,
        };

        if atlas.options.preload {
            atlas.preload()?;
        }
        Ok(atlas)
    }

    /// Loads the corpus and, with `use_map`, builds both indexes now.
    pub fn preload(&self) -> Result<()> {
        let data = self.loader.ensure_loaded()?;
        if self.options.use_map {
            self.country_index(data);
            self.state_index(data);
        }
        tracing::debug!(use_map = self.options.use_map, "atlas preloaded");
        Ok(())
    }

    /// All countries, as an owned copy.
    pub fn get_all_countries(&self) -> Result<Vec<Country>> {
        let data = self.loader.ensure_loaded()?;
        Ok(through_cache(
            &self.countries_cache,
            QueryKey::AllCountries,
            || data.countries.clone(),
        ))
    }

    /// The country whose iso2 or iso3 code equals `code` (exact, case-sensitive).
    pub fn get_country_by_code(&self, code: &str) -> Result<Option<Country>> {
        let data = self.loader.ensure_loaded()?;
        let lookup = || {
            if self.options.use_map {
                self.country_index(data)
                    .get(&data.countries, code)
                    .cloned()
            } else {
                index::scan_country(&data.countries, code).cloned()
            }
        };

        Ok(through_cache(&self.country_cache, QueryKey::Country(code), || {
            if self.options.memoize {
                self.country_memo
                    .get_or_compute(code.to_string(), |_| lookup())
            } else {
                lookup()
            }
        }))
    }

    /// All states, as an owned copy.
    pub fn get_all_states(&self) -> Result<Vec<State>> {
        let data = self.loader.ensure_loaded()?;
        Ok(through_cache(&self.states_cache, QueryKey::AllStates, || {
            data.states.clone()
        }))
    }

    /// States whose `country_code` equals `country_code`, in corpus order.
    /// Empty when nothing matches.
    pub fn get_states_by_country(&self, country_code: &str) -> Result<Vec<State>> {
        let data = self.loader.ensure_loaded()?;
        let lookup = || {
            if self.options.use_map {
                self.state_index(data).collect(&data.states, country_code)
            } else {
                index::scan_states(&data.states, country_code)
            }
        };

        Ok(through_cache(
            &self.states_cache,
            QueryKey::StatesOf(country_code),
            || {
                if self.options.memoize {
                    self.states_memo
                        .get_or_compute(country_code.to_string(), |_| lookup())
                } else {
                    lookup()
                }
            },
        ))
    }

    /// `true` if `code` is the iso2 or iso3 code of some country.
    pub fn is_country_code(&self, code: &str) -> Result<bool> {
        let data = self.loader.ensure_loaded()?;
        let codes = self
            .code_set
            .get_or_init(|| index::country_code_set(&data.countries));
        Ok(codes.contains(code))
    }

    pub fn stats(&self) -> Result<DbStats> {
        let data = self.loader.ensure_loaded()?;
        let cached_entries = self.countries_cache.as_ref().map_or(0, ResultCache::len)
            + self.country_cache.as_ref().map_or(0, ResultCache::len)
            + self.states_cache.as_ref().map_or(0, ResultCache::len);
        Ok(DbStats {
            countries: data.country_count(),
            states: data.state_count(),
            indexed_codes: self.country_index.get().map_or(0, CountryIndex::len),
            cached_entries,
        })
    }

    /// Read-only view of the loaded corpus.
    pub fn dataset(&self) -> Result<&Dataset> {
        self.loader.ensure_loaded()
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.is_loaded()
    }

    pub fn options(&self) -> &AtlasOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        self.loader.source()
    }

    fn country_index(&self, data: &Dataset) -> &CountryIndex {
        self.country_index
            .get_or_init(|| CountryIndex::build(&data.countries))
    }

    fn state_index(&self, data: &Dataset) -> &StateIndex {
        self.state_index
            .get_or_init(|| StateIndex::build(&data.states))
    }
}

fn through_cache<V: Clone>(
    cache: &Option<ResultCache<V>>,
    key: QueryKey<'_>,
    compute: impl FnOnce() -> V,
) -> V {
    match cache {
        Some(cache) => cache.get_or_compute(&key.to_string(), compute),
        None => compute(),
    }
}

#[cfg(feature = "json")]
mod bundled {
    use super::Atlas;
    use crate::error::Result;
    use crate::loader::JsonSource;
    use crate::options::AtlasOptions;
    use once_cell::sync::OnceCell;

    static BUNDLED: OnceCell<Atlas<JsonSource>> = OnceCell::new();

    impl Atlas<JsonSource> {
        /// Process-wide instance over the corpus shipped in `atlas-core/data/`.
        ///
        /// Loaded and indexed on first call; later calls share it. A failed
        /// load is not remembered, so the next call tries again.
        pub fn bundled() -> Result<&'static Self> {
            BUNDLED.get_or_try_init(|| {
                Atlas::new(JsonSource::bundled(), AtlasOptions::default().with_preload(true))
            })
        }
    }
}
