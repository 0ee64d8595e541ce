// crates/atlas-core/src/model.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timezone entry for a country, as in the corpus:
/// {
///   "zoneName": "Europe/Andorra",
///   "gmtOffset": 3600,
///   "gmtOffsetName": "UTC+01:00",
///   "abbreviation": "CET",
///   "tzName": "Central European Time"
/// }
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timezone {
    #[serde(rename = "zoneName", default)]
    pub zone_name: String,
    #[serde(rename = "gmtOffset", default)]
    pub gmt_offset: i64,
    #[serde(rename = "gmtOffsetName", default)]
    pub gmt_offset_name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(rename = "tzName", default)]
    pub tz_name: String,
}

/// A country record.
///
/// Only `iso2` and `iso3` are interpreted by the lookup layer; everything else
/// is payload carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: u32,
    pub name: String,
    pub iso3: String,
    pub iso2: String,
    #[serde(default)]
    pub numeric_code: String,
    #[serde(default)]
    pub phone_code: String,
    #[serde(default)]
    pub capital: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub currency_name: String,
    #[serde(default)]
    pub currency_symbol: String,
    #[serde(default)]
    pub tld: String,
    #[serde(default)]
    pub native: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub region_id: String,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub subregion_id: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub timezones: Vec<Timezone>,
    /// translations: { "de": "Andorra", "fr": "Andorre", ... }
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(rename = "emojiU", default)]
    pub emoji_u: String,
}

/// A state / province / region record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: u32,
    pub name: String,
    pub country_id: u32,
    /// ISO2 code of the owning country. States are grouped by this field.
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub state_code: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

/// The complete, immutable corpus.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub countries: Vec<Country>,
    pub states: Vec<State>,
}

impl Dataset {
    pub fn new(countries: Vec<Country>, states: Vec<State>) -> Self {
        Self { countries, states }
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

impl Country {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn iso2(&self) -> &str {
        &self.iso2
    }

    pub fn iso3(&self) -> &str {
        &self.iso3
    }

    /// `true` if `code` equals this country's iso2 or iso3 code (exact match).
    /// The empty string is never a code.
    pub fn has_code(&self, code: &str) -> bool {
        !code.is_empty() && (self.iso2 == code || self.iso3 == code)
    }

    /// Localized name, if the corpus carries a translation for `locale`.
    pub fn translation(&self, locale: &str) -> Option<&str> {
        self.translations.get(locale).map(String::as_str)
    }

    pub fn timezones(&self) -> &[Timezone] {
        &self.timezones
    }
}

impl State {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state_code(&self) -> &str {
        &self.state_code
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_deserializes_with_payload_defaults() {
        let json = r#"{"id":1,"name":"United States","iso3":"USA","iso2":"US","emojiU":"U+1F1FA U+1F1F8"}"#;
        let c: Country = serde_json::from_str(json).unwrap();
        assert_eq!(c.iso2(), "US");
        assert_eq!(c.emoji_u, "U+1F1FA U+1F1F8");
        assert!(c.timezones.is_empty());
        assert!(c.has_code("USA"));
        assert!(!c.has_code("us"));
    }

    #[test]
    fn state_type_maps_to_kind() {
        let json = r#"{"id":1416,"name":"California","country_id":233,"country_code":"US","type":"state"}"#;
        let s: State = serde_json::from_str(json).unwrap();
        assert_eq!(s.kind(), Some("state"));

        let json = r#"{"id":7,"name":"Nowhere","country_id":1,"country_code":"ZZ","type":null}"#;
        let s: State = serde_json::from_str(json).unwrap();
        assert_eq!(s.kind(), None);
    }

    #[test]
    fn timezone_uses_corpus_field_names() {
        let json = r#"{"zoneName":"Europe/Paris","gmtOffset":3600,"gmtOffsetName":"UTC+01:00","abbreviation":"CET","tzName":"Central European Time"}"#;
        let tz: Timezone = serde_json::from_str(json).unwrap();
        assert_eq!(tz.zone_name, "Europe/Paris");
        assert_eq!(tz.gmt_offset, 3600);
    }
}
