//! Subcommands and the helpers they share.

pub mod batch;
pub mod categories;
pub mod config;
pub mod parse;

use std::path::Path;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use gasto_core::{ExtractionEngine, GastoConfig};

/// Load the config from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<GastoConfig> {
    if let Some(path) = config_path {
        return Ok(GastoConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(GastoConfig::from_file(&default_path)?)
    } else {
        Ok(GastoConfig::default())
    }
}

/// Build an engine from config plus `CATEGORY=WORD` keyword overrides.
pub fn build_engine(config: &GastoConfig, keywords: &[String]) -> anyhow::Result<ExtractionEngine> {
    let engine = ExtractionEngine::from_config(config)?;

    for entry in keywords {
        let (category, word) = entry
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid keyword {:?}, expected CATEGORY=WORD", entry))?;
        engine.add_keyword(category, word)?;
    }

    Ok(engine)
}

/// Reference time for date resolution: the given day, or now.
pub fn reference_time(date: Option<NaiveDate>) -> NaiveDateTime {
    match date {
        Some(date) => date.and_time(NaiveTime::MIN),
        None => Local::now().naive_local(),
    }
}
