//! Config command - inspect and edit the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use gasto_core::extraction::rules::KeywordTable;
use gasto_core::{CategoryTag, GastoConfig, KeywordError};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a value by dotted key (e.g. "display.currency_symbol")
    Get { key: String },

    /// Set a value by dotted key
    Set { key: String, value: String },

    /// Persist an extra category keyword
    AddKeyword { category: String, keyword: String },

    /// Show configuration file path
    Path,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gasto")
        .join("config.json")
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init { force } => init_config(&path, force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::AddKeyword { category, keyword } => add_keyword(&path, &category, &keyword),
        ConfigCommand::Path => show_path(&path),
    }
}

fn read_or_default(path: &Path) -> anyhow::Result<GastoConfig> {
    if path.exists() {
        Ok(GastoConfig::from_file(path)?)
    } else {
        Ok(GastoConfig::default())
    }
}

fn write_config(path: &Path, config: &GastoConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!("{} No config file found, showing defaults.", style("ℹ").blue());
    }
    let config = read_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_config(path, &GastoConfig::default())?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(read_or_default(path)?)?;

    let value = key
        .split('.')
        .try_fold(&json, |current, part| current.get(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = read_or_default(path)?;

    // Anything that is not valid JSON is stored as a plain string
    let parsed: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;
    let (parents, last) = match key.rsplit_once('.') {
        Some((parents, last)) => (Some(parents), last),
        None => (None, key),
    };

    let mut target = &mut json;
    if let Some(parents) = parents {
        for part in parents.split('.') {
            target = target
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    let object = target
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path: {}", key))?;
    object.insert(last.to_string(), parsed.clone());

    let updated: GastoConfig = serde_json::from_value(json)?;
    write_config(path, &updated)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );
    Ok(())
}

fn add_keyword(path: &Path, category: &str, keyword: &str) -> anyhow::Result<()> {
    let tag: CategoryTag = category
        .parse()
        .map_err(KeywordError::UnknownCategory)?;

    // Validates the category and keyword the same way the engine will
    KeywordTable::empty().add_keyword(tag, keyword)?;
    let keyword = keyword.trim().to_lowercase();

    let mut config = read_or_default(path)?;
    let words = config
        .keywords
        .extra
        .entry(tag.as_str().to_string())
        .or_default();

    if words.contains(&keyword) {
        println!("{} '{}' already listed under {}", style("ℹ").blue(), keyword, tag);
        return Ok(());
    }
    words.push(keyword.clone());
    write_config(path, &config)?;

    println!("{} Added '{}' to {}", style("✓").green(), keyword, tag);
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'gasto config init' to create a configuration file.");
    }
    Ok(())
}
