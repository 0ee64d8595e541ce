use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for atlas-cli
#[derive(Debug, Parser)]
#[command(
    name = "atlas",
    version,
    about = "CLI for querying the atlas-core country and state lookups"
)]
pub struct CliArgs {
    /// Directory holding countries.json and states.json (default: bundled sample)
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// JSON options file (keys: preload, useMap, cacheResults, cacheDuration, memoize)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Disable the lookup indexes and scan the corpus on every query
    #[arg(long = "no-map", global = true)]
    pub no_map: bool,

    /// Enable the result cache
    #[arg(long = "cache", global = true)]
    pub cache: bool,

    /// Result cache TTL in seconds (implies --cache)
    #[arg(long = "cache-duration", global = true)]
    pub cache_duration: Option<u64>,

    /// Load data and build indexes before running the command
    #[arg(long = "preload", global = true)]
    pub preload: bool,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset
    Stats,

    /// List all countries
    Countries,

    /// Lookup a country by ISO2 or ISO3 code
    Country {
        /// ISO2 or ISO3 code (e.g. DE, USA); case-sensitive
        code: String,
    },

    /// List states, optionally only those of one country
    States {
        /// ISO2 code of the country
        #[arg(long = "country")]
        country: Option<String>,
    },
}
