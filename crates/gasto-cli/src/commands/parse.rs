//! Parse command - extract a transaction from a single sentence.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::{debug, info};

use gasto_core::models::config::GastoConfig;
use gasto_core::{ExtractionResult, Transaction, TransactionExtractor, format_amount};

use super::{build_engine, load_config, reference_time};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Sentence describing the transaction (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Reference date (YYYY-MM-DD) used instead of today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Extra keyword for this run, as CATEGORY=WORD (repeatable)
    #[arg(short, long = "keyword", value_name = "CATEGORY=WORD")]
    keywords: Vec<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let engine = build_engine(&config, &args.keywords)?;

    let text = args.text.join(" ");
    info!("Parsing sentence: {}", text);

    let result = match args.date {
        Some(date) => engine.extract(&text, reference_time(Some(date))),
        None => engine.extract_now(&text),
    };

    let transaction = match &result {
        ExtractionResult::Success(tx) => tx,
        ExtractionResult::Failure { reason } => anyhow::bail!("{}", reason),
    };

    let output = format_transaction(transaction, &text, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_transaction(
    transaction: &Transaction,
    original_text: &str,
    format: OutputFormat,
    config: &GastoConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let result = ExtractionResult::Success(transaction.clone());
            Ok(serde_json::to_string_pretty(&result)?)
        }
        OutputFormat::Csv => format_csv(transaction, original_text),
        OutputFormat::Text => Ok(format_text(transaction, config)),
    }
}

fn format_csv(transaction: &Transaction, original_text: &str) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "amount",
        "category",
        "direction",
        "date",
        "description",
        "original_text",
    ])?;

    wtr.write_record([
        transaction.amount.to_string().as_str(),
        transaction.category.as_str(),
        transaction.direction.as_str(),
        &transaction.date.to_string(),
        &transaction.description,
        original_text,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(transaction: &Transaction, config: &GastoConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Monto:       {}\n",
        format_amount(transaction.amount, &config.display.currency_symbol)
    ));
    output.push_str(&format!(
        "Categoría:   {} {}\n",
        transaction.category.emoji(),
        transaction.category.label()
    ));
    output.push_str(&format!("Tipo:        {}\n", transaction.direction.label()));
    output.push_str(&format!("Fecha:       {}\n", transaction.date.format("%d/%m/%Y")));
    output.push_str(&format!("Descripción: {}\n", transaction.description));

    output
}
