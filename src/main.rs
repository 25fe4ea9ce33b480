use anyhow::{Context, Result};
use log::debug;
use std::env;
use std::path::Path;

use csvshift::data;
use csvshift::reshape::Reshaper;
use csvshift::settings::Settings;

const DEFAULT_SETTINGS_PATH: &str = "settings.json";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: cargo run -- [settings_file]");
        std::process::exit(1);
    }
    let settings_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_SETTINGS_PATH);

    let settings = Settings::load(Path::new(settings_path))?;
    debug!(
        "settings loaded, app_id={}, {} -> {}",
        settings.app_id, settings.default_timezone, settings.output_timezone
    );

    let table = data::read_csv(&settings.input_path)?;
    let reshaper = Reshaper::new(&settings, &table.header);

    // Transform everything before opening the output file, so a bad row
    // leaves any previous output intact.
    let mut rows = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let reshaped = reshaper
            .reshape_row(row)
            .with_context(|| format!("input line {}", i + 2))?;
        rows.push(reshaped);
    }

    data::write_csv(&settings.output_path, reshaper.output_header(), &rows)?;

    Ok(())
}
