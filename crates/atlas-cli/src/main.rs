//! atlas-cli — Command-line interface for atlas-core
//!
//! Usage examples
//! --------------
//!
//! - Show dataset stats
//!   $ atlas-cli stats
//!
//! - List all countries
//!   $ atlas-cli countries
//!
//! - Show a country by code (ISO2 or ISO3, exact case)
//!   $ atlas-cli country US
//!   $ atlas-cli country DEU --json
//!
//! - List states, all or for one country (by ISO2)
//!   $ atlas-cli states
//!   $ atlas-cli states --country FR
//!
//! Data source
//! -----------
//!
//! Without `--data-dir` the sample corpus bundled with `atlas-core` is used.
//! A directory may hold plain or gzipped `countries.json` / `states.json`.
use anyhow::Context;
use atlas_cli::{find_country, init_tracing, options_from_args, CliArgs, Commands};
use atlas_core::{Atlas, JsonSource};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let options = options_from_args(&args)?;
    let source = match &args.data_dir {
        Some(dir) => JsonSource::from_dir(dir),
        None => JsonSource::bundled(),
    };
    tracing::debug!(?options, "starting atlas");

    let atlas = Atlas::new(source, options).context("preloading dataset")?;

    match args.command {
        Commands::Stats => {
            let stats = atlas.stats()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Dataset statistics:");
                println!("  Countries: {}", stats.countries);
                println!("  States/Regions: {}", stats.states);
                println!("  Indexed codes: {}", stats.indexed_codes);
            }
        }

        Commands::Countries => {
            let countries = atlas.get_all_countries()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&countries)?);
            } else {
                for c in &countries {
                    println!("{} ({}/{})", c.name(), c.iso2(), c.iso3());
                }
            }
        }

        Commands::Country { code } => {
            let c = find_country(&atlas, &code)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&c)?);
            } else {
                println!("{} ({}/{})", c.name(), c.iso2(), c.iso3());
                println!("  Capital: {}", c.capital);
                println!("  Currency: {} ({})", c.currency, c.currency_name);
                println!("  Region: {} / {}", c.region, c.subregion);
                println!("  Phone code: +{}", c.phone_code);
                for tz in c.timezones() {
                    println!("  Timezone: {} ({})", tz.zone_name, tz.gmt_offset_name);
                }
            }
        }

        Commands::States { country } => {
            let states = match &country {
                Some(cc) => atlas.get_states_by_country(cc)?,
                None => atlas.get_all_states()?,
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&states)?);
            } else {
                for s in &states {
                    println!("{} [{}] ({})", s.name(), s.state_code(), s.country_code);
                }
            }
        }
    }

    Ok(())
}
