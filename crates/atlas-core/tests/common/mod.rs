#![allow(dead_code)]

use atlas_core::{AtlasError, Country, Dataset, FnSource, Result, State};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn country(id: u32, iso2: &str, iso3: &str, name: &str) -> Country {
    Country {
        id,
        name: name.into(),
        iso2: iso2.into(),
        iso3: iso3.into(),
        ..Default::default()
    }
}

pub fn state(id: u32, country_id: u32, country_code: &str, name: &str) -> State {
    State {
        id,
        name: name.into(),
        country_id,
        country_code: country_code.into(),
        ..Default::default()
    }
}

/// US with two states, FR with one, DE with none.
pub fn scenario() -> Dataset {
    Dataset::new(
        vec![
            country(1, "US", "USA", "United States"),
            country(2, "FR", "FRA", "France"),
            country(3, "DE", "DEU", "Germany"),
        ],
        vec![
            state(10, 1, "US", "California"),
            state(20, 2, "FR", "Île-de-France"),
            state(11, 1, "US", "Texas"),
        ],
    )
}

pub fn names(states: &[State]) -> Vec<&str> {
    states.iter().map(|s| s.name.as_str()).collect()
}

/// A source that counts fetches and optionally fails the first `failures`.
pub struct Counting {
    pub fetches: Arc<AtomicUsize>,
}

impl Counting {
    pub fn source(
        data: Dataset,
        failures: usize,
        delay: Duration,
    ) -> (Self, FnSource<impl Fn() -> Result<Dataset> + Send + Sync>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fetches);
        let source = FnSource::new(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            if n < failures {
                return Err(AtlasError::data_unavailable("test", "simulated outage"));
            }
            Ok(data.clone())
        });
        (Self { fetches }, source)
    }

    pub fn count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}
