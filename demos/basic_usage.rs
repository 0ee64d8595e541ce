// demos/basic_usage.rs
//
// cargo run --example basic_usage
use atlas_core::{Atlas, AtlasOptions, JsonSource, Result};

fn main() -> Result<()> {
    println!("=== atlas basic usage ===\n");

    // Lazy: nothing is read until the first query.
    let atlas = Atlas::new(
        JsonSource::bundled(),
        AtlasOptions::default().with_cache(60).with_memoize(true),
    )?;
    println!("Loaded before first query? {}", atlas.is_loaded());

    let countries = atlas.get_all_countries()?;
    println!("Countries: {}", countries.len());
    for c in countries.iter().take(5) {
        println!("  - {} ({}/{}) {}", c.name(), c.iso2(), c.iso3(), c.emoji);
    }
    println!();

    // Both code forms reach the same record.
    for code in ["US", "USA", "XX"] {
        match atlas.get_country_by_code(code)? {
            Some(c) => println!("{code:>4} -> {} (id {})", c.name(), c.id),
            None => println!("{code:>4} -> not found"),
        }
    }
    println!();

    if let Some(fr) = atlas.get_country_by_code("FR")? {
        println!("{} in German: {}", fr.name(), fr.translation("de").unwrap_or("-"));
        let states = atlas.get_states_by_country(fr.iso2())?;
        println!("States of {}:", fr.name());
        for s in &states {
            println!("  - {} [{}] {}", s.name(), s.state_code(), s.kind().unwrap_or(""));
        }
    }
    println!();

    println!("States of unknown code 'ZZ': {:?}", atlas.get_states_by_country("ZZ")?);
    println!("Stats: {:?}", atlas.stats()?);
    Ok(())
}
