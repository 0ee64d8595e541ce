// crates/atlas-core/src/index.rs

//! Secondary lookup structures derived from the corpus.
//!
//! Indexes store positions into the corpus vectors rather than references or
//! copies, so they can live next to the [`Dataset`](crate::Dataset) they were
//! built from without borrowing it.

use crate::model::{Country, State};
use std::collections::{HashMap, HashSet};

/// Code -> country position, keyed by both iso2 and iso3.
///
/// Built in corpus order: if two countries share a code the later one wins.
/// The corpus is trusted not to contain such collisions.
#[derive(Debug, Clone, Default)]
pub struct CountryIndex {
    by_code: HashMap<String, usize>,
}

impl CountryIndex {
    pub fn build(countries: &[Country]) -> Self {
        let mut by_code = HashMap::with_capacity(countries.len() * 2);
        for (pos, country) in countries.iter().enumerate() {
            for code in [&country.iso2, &country.iso3] {
                if code.is_empty() {
                    continue;
                }
                if let Some(prev) = by_code.insert(code.clone(), pos) {
                    if prev != pos {
                        tracing::warn!(code = %code, previous = prev, current = pos, "duplicate country code");
                    }
                }
            }
        }
        tracing::debug!(countries = countries.len(), keys = by_code.len(), "country index built");
        Self { by_code }
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.by_code.get(code).copied()
    }

    pub fn get<'a>(&self, countries: &'a [Country], code: &str) -> Option<&'a Country> {
        self.position(code).and_then(|pos| countries.get(pos))
    }

    /// Number of indexed codes (normally twice the number of countries).
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Country code -> positions of its states, in corpus order.
#[derive(Debug, Clone, Default)]
pub struct StateIndex {
    by_country: HashMap<String, Vec<usize>>,
}

impl StateIndex {
    pub fn build(states: &[State]) -> Self {
        let mut by_country: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, state) in states.iter().enumerate() {
            by_country
                .entry(state.country_code.clone())
                .or_default()
                .push(pos);
        }
        tracing::debug!(states = states.len(), groups = by_country.len(), "state index built");
        Self { by_country }
    }

    pub fn positions(&self, country_code: &str) -> &[usize] {
        self.by_country
            .get(country_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Owned copies of the states grouped under `country_code`.
    pub fn collect(&self, states: &[State], country_code: &str) -> Vec<State> {
        self.positions(country_code)
            .iter()
            .filter_map(|&pos| states.get(pos).cloned())
            .collect()
    }

    /// Number of distinct country codes with at least one state.
    pub fn len(&self) -> usize {
        self.by_country.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_country.is_empty()
    }
}

/// Every iso2 and iso3 code in the corpus.
pub fn country_code_set(countries: &[Country]) -> HashSet<String> {
    countries
        .iter()
        .flat_map(|c| [c.iso2.clone(), c.iso3.clone()])
        .filter(|code| !code.is_empty())
        .collect()
}

/// Linear-scan fallback for [`CountryIndex::get`]: first match wins.
pub fn scan_country<'a>(countries: &'a [Country], code: &str) -> Option<&'a Country> {
    countries.iter().find(|c| c.has_code(code))
}

/// Linear-scan fallback for [`StateIndex::collect`].
pub fn scan_states(states: &[State], country_code: &str) -> Vec<State> {
    states
        .iter()
        .filter(|s| s.country_code == country_code)
        .cloned()
        .collect()
}
