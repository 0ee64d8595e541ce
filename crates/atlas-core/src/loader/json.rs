// crates/atlas-core/src/loader/json.rs

// ---------------------------------------------------------------------------
// FILE GUARD: this module is only compiled with the 'json' feature.
// ---------------------------------------------------------------------------

use super::common_io::{self, get_cache_path, SNAPSHOT_SUFFIX};
use super::snapshot::{read_snapshot, write_snapshot};
use super::DatasetSource;
use crate::error::{AtlasError, Result};
use crate::model::{Country, Dataset, State};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const COUNTRIES_FILE: &str = "countries.json";
pub const STATES_FILE: &str = "states.json";

/// Reads the corpus from a `countries.json` / `states.json` pair.
///
/// Either file may be gzipped (`.json.gz`, needs the `compact` feature).
/// With [`JsonSource::with_snapshot`] the parsed corpus is also cached as a
/// binary snapshot, which is preferred on later fetches while it is newer
/// than both JSON files.
#[derive(Debug, Clone)]
pub struct JsonSource {
    countries_path: PathBuf,
    states_path: PathBuf,
    snapshot_path: Option<PathBuf>,
}

impl JsonSource {
    pub fn from_paths(countries: impl Into<PathBuf>, states: impl Into<PathBuf>) -> Self {
        Self {
            countries_path: countries.into(),
            states_path: states.into(),
            snapshot_path: None,
        }
    }

    /// Uses `countries.json` and `states.json` (or their `.gz` variants) in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::from_paths(
            resolve_in_dir(dir, COUNTRIES_FILE),
            resolve_in_dir(dir, STATES_FILE),
        )
    }

    /// The sample corpus shipped in this crate's `data/` directory.
    pub fn bundled() -> Self {
        Self::from_dir(Self::default_data_dir())
    }

    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Snapshot next to the countries file, e.g. `countries.json.snapshot.bin.gz`.
    pub fn with_default_snapshot(self) -> Self {
        let path = get_cache_path(&self.countries_path, SNAPSHOT_SUFFIX);
        self.with_snapshot(path)
    }

    pub fn countries_path(&self) -> &Path {
        &self.countries_path
    }

    pub fn states_path(&self) -> &Path {
        &self.states_path
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Parses both JSON files, ignoring any snapshot.
    pub fn parse(&self) -> Result<Dataset> {
        let countries: Vec<Country> = read_json(&self.countries_path)?;
        let states: Vec<State> = read_json(&self.states_path)?;
        Ok(Dataset::new(countries, states))
    }

    fn is_snapshot_fresh(&self, snapshot: &Path) -> bool {
        let snap_time = match fs::metadata(snapshot).and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(_) => return false,
        };
        [&self.countries_path, &self.states_path].iter().all(|src| {
            match fs::metadata(src).and_then(|m| m.modified()) {
                Ok(src_time) => src_time <= snap_time,
                Err(_) => true,
            }
        })
    }
}

impl DatasetSource for JsonSource {
    fn fetch(&self) -> Result<Dataset> {
        let Some(snapshot) = self.snapshot_path.as_deref() else {
            return self.parse();
        };

        if self.is_snapshot_fresh(snapshot) {
            match read_snapshot(snapshot) {
                Ok(data) => return Ok(data),
                Err(e) => {
                    tracing::warn!(path = %snapshot.display(), error = %e, "ignoring unreadable snapshot");
                }
            }
        }

        let data = self.parse()?;
        // Best effort: a read-only data dir must not fail the load.
        if let Err(e) = write_snapshot(snapshot, &data) {
            tracing::warn!(path = %snapshot.display(), error = %e, "could not write snapshot");
        }
        Ok(data)
    }

    fn describe(&self) -> String {
        format!(
            "json({}, {})",
            self.countries_path.display(),
            self.states_path.display()
        )
    }
}

fn resolve_in_dir(dir: &Path, name: &str) -> PathBuf {
    let plain = dir.join(name);
    let gz = dir.join(format!("{name}.gz"));
    if !plain.exists() && gz.exists() {
        gz
    } else {
        plain
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = common_io::open_stream(path)?;
    serde_json::from_reader(reader)
        .map_err(|e| AtlasError::data_unavailable(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, SystemTime};

    fn write(dir: &Path, name: &str, body: &str) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    fn seed(dir: &Path) {
        write(
            dir,
            COUNTRIES_FILE,
            r#"[{"id":1,"name":"France","iso3":"FRA","iso2":"FR"}]"#,
        );
        write(
            dir,
            STATES_FILE,
            r#"[{"id":4796,"name":"Île-de-France","country_id":1,"country_code":"FR"}]"#,
        );
    }

    #[test]
    fn parses_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let data = JsonSource::from_dir(dir.path()).fetch().unwrap();
        assert_eq!(data.countries[0].iso3, "FRA");
        assert_eq!(data.states[0].name, "Île-de-France");
    }

    #[test]
    fn malformed_json_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), COUNTRIES_FILE, "[{not json");
        write(dir.path(), STATES_FILE, "[]");
        let err = JsonSource::from_dir(dir.path()).fetch().unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn snapshot_is_written_and_reused() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let source = JsonSource::from_dir(dir.path()).with_default_snapshot();
        let snapshot = source.snapshot_path().unwrap().to_path_buf();

        let first = source.fetch().unwrap();
        assert!(snapshot.exists());

        // Corrupt the JSON: a fresh snapshot must still be served.
        write(dir.path(), STATES_FILE, "oops");
        let filetime = fs::metadata(&snapshot).unwrap().modified().unwrap();
        fs::File::options()
            .write(true)
            .open(dir.path().join(STATES_FILE))
            .unwrap()
            .set_modified(filetime)
            .unwrap();

        let second = source.fetch().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stale_snapshot_is_rebuilt() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let source = JsonSource::from_dir(dir.path()).with_default_snapshot();
        let snapshot = source.snapshot_path().unwrap().to_path_buf();
        assert_eq!(source.fetch().unwrap().state_count(), 1);

        write(
            dir.path(),
            STATES_FILE,
            r#"[{"id":4796,"name":"Île-de-France","country_id":1,"country_code":"FR"},
                {"id":4795,"name":"Bretagne","country_id":1,"country_code":"FR"}]"#,
        );
        let snap_time = fs::metadata(&snapshot).unwrap().modified().unwrap();
        fs::File::options()
            .write(true)
            .open(dir.path().join(STATES_FILE))
            .unwrap()
            .set_modified(snap_time + Duration::from_secs(10))
            .unwrap();

        let data = source.fetch().unwrap();
        assert_eq!(data.state_count(), 2);
        assert_eq!(data.states[1].name, "Bretagne");
        // The rewritten snapshot carries the new content.
        assert_eq!(read_snapshot(&snapshot).unwrap().state_count(), 2);
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_json() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let source = JsonSource::from_dir(dir.path()).with_default_snapshot();
        let snapshot = source.snapshot_path().unwrap().to_path_buf();
        let expected = source.parse().unwrap();

        fs::write(&snapshot, b"not a snapshot at all").unwrap();
        fs::File::options()
            .write(true)
            .open(&snapshot)
            .unwrap()
            .set_modified(SystemTime::now() + Duration::from_secs(10))
            .unwrap();

        assert_eq!(source.fetch().unwrap(), expected);
        assert_eq!(read_snapshot(&snapshot).unwrap(), expected);
    }

    #[test]
    fn bundled_corpus_is_readable() {
        let data = JsonSource::bundled().parse().unwrap();
        assert!(data.country_count() > 0);
        assert!(data.state_count() > 0);
    }
}
