//! atlas-cli
//! =========
//!
//! Command-line interface for the `atlas-core` country and state lookups.
//!
//! The binary (`atlas-cli`) is the primary deliverable; this library target
//! holds argument parsing and the translation of flags into
//! [`AtlasOptions`] so both can be tested without spawning the binary.
//!
//! Basic usage:
//!
//! ```text
//! atlas-cli --help
//! atlas-cli stats
//! atlas-cli country USA
//! atlas-cli states --country FR
//! atlas-cli --data-dir ./data --no-map countries
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod args;

use anyhow::Context;
use atlas_core::{Atlas, AtlasOptions, Country, DatasetSource};
use tracing_subscriber::EnvFilter;

pub use args::{CliArgs, Commands};

/// Options file first (if any), then command-line flags on top.
pub fn options_from_args(args: &CliArgs) -> anyhow::Result<AtlasOptions> {
    let mut options = match &args.config {
        Some(path) => AtlasOptions::from_json_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => AtlasOptions::default(),
    };

    if args.no_map {
        options.use_map = false;
    }
    if args.preload {
        options.preload = true;
    }
    if let Some(seconds) = args.cache_duration {
        options = options.with_cache(seconds);
    } else if args.cache {
        options.cache_results = true;
    }
    Ok(options)
}

/// Looks a code up, turning "no such country" into an error for the exit status.
pub fn find_country<S: DatasetSource>(atlas: &Atlas<S>, code: &str) -> anyhow::Result<Country> {
    atlas
        .get_country_by_code(code)?
        .with_context(|| format!("no country found for code '{code}'"))
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
