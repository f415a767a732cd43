//! Categories command - list categories and their keywords.

use clap::Args;
use console::style;

use super::{build_engine, load_config};

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Also print each category's keywords
    #[arg(short, long)]
    keywords: bool,
}

pub fn run(args: CategoriesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let engine = build_engine(&config, &[])?;

    for category in engine.categories() {
        let keywords = engine.keywords(category);

        println!(
            "{} {:<16} {}",
            category.emoji(),
            style(category.as_str()).bold(),
            style(format!("({} keywords)", keywords.len())).dim()
        );

        if args.keywords && !keywords.is_empty() {
            println!("    {}", keywords.join(", "));
        }
    }

    Ok(())
}
