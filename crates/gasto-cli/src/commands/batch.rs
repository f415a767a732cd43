//! Batch command - extract one transaction per line of many text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use gasto_core::models::config::GastoConfig;
use gasto_core::{
    ExtractionEngine, ExtractionResult, Summary, Transaction, TransactionExtractor, format_amount,
};

use super::parse::OutputFormat;
use super::{build_engine, load_config, reference_time};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print totals, mean, median and per-category spending
    #[arg(long)]
    summary: bool,

    /// Keep going when a line has no amount
    #[arg(long)]
    continue_on_error: bool,

    /// Reference date (YYYY-MM-DD) used instead of today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Extra keyword for this run, as CATEGORY=WORD (repeatable)
    #[arg(short, long = "keyword", value_name = "CATEGORY=WORD")]
    keywords: Vec<String>,
}

/// One processed line.
#[derive(Debug, Serialize)]
struct BatchEntry {
    file: PathBuf,
    line: usize,
    text: String,
    #[serde(flatten)]
    result: ExtractionResult,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let engine = build_engine(&config, &args.keywords)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let mut sentences = Vec::new();
    for path in &files {
        sentences.extend(read_sentences(path)?);
    }

    eprintln!(
        "{} Found {} sentences in {} files",
        style("ℹ").blue(),
        sentences.len(),
        files.len()
    );

    let pb = ProgressBar::new(sentences.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines")?
            .progress_chars("=>-"),
    );

    let now = reference_time(args.date);
    let mut entries = Vec::with_capacity(sentences.len());

    for (file, line, text) in sentences {
        let entry = process_line(&engine, file, line, text, now);

        if let ExtractionResult::Failure { reason } = &entry.result {
            if args.continue_on_error {
                warn!("{}:{}: {}", entry.file.display(), entry.line, reason);
            } else {
                pb.abandon();
                error!("{}:{}: {}", entry.file.display(), entry.line, reason);
                anyhow::bail!(
                    "Processing failed at {}:{}: {}",
                    entry.file.display(),
                    entry.line,
                    reason
                );
            }
        }

        entries.push(entry);
        pb.inc(1);
    }

    pb.finish_and_clear();

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&entries)?,
        OutputFormat::Csv => format_csv(&entries)?,
        OutputFormat::Text => format_text(&entries, &config),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        debug!("Wrote output to {}", output_path.display());
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let transactions: Vec<Transaction> = entries
        .iter()
        .filter_map(|e| e.result.transaction().cloned())
        .collect();
    let failed: Vec<&BatchEntry> = entries.iter().filter(|e| !e.result.is_success()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} lines in {:?}",
        style("✓").green(),
        entries.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(transactions.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed lines:").red());
        for entry in &failed {
            eprintln!(
                "  - {}:{}: {}",
                entry.file.display(),
                entry.line,
                entry.result.message()
            );
        }
    }

    if args.summary {
        let summary = Summary::from_transactions(&transactions)?;
        eprintln!();
        eprint!("{}", format_summary(&summary, &config));
    }

    Ok(())
}

/// Non-empty lines not starting with `#`, numbered from 1.
fn read_sentences(path: &Path) -> anyhow::Result<Vec<(PathBuf, usize, String)>> {
    let content = fs::read_to_string(path)?;

    Ok(content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| (path.to_path_buf(), n, line.to_string()))
        .collect())
}

fn process_line(
    engine: &ExtractionEngine,
    file: PathBuf,
    line: usize,
    text: String,
    now: NaiveDateTime,
) -> BatchEntry {
    let result = engine.extract(&text, now);
    BatchEntry {
        file,
        line,
        text,
        result,
    }
}

fn format_csv(entries: &[BatchEntry]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "file",
        "line",
        "status",
        "amount",
        "category",
        "direction",
        "date",
        "description",
        "original_text",
        "reason",
    ])?;

    for entry in entries {
        let file = entry.file.display().to_string();
        let line = entry.line.to_string();

        match &entry.result {
            ExtractionResult::Success(tx) => wtr.write_record([
                file.as_str(),
                &line,
                "success",
                &tx.amount.to_string(),
                tx.category.as_str(),
                tx.direction.as_str(),
                &tx.date.to_string(),
                &tx.description,
                &entry.text,
                "",
            ])?,
            ExtractionResult::Failure { reason } => wtr.write_record([
                file.as_str(),
                &line,
                "failure",
                "",
                "",
                "",
                "",
                "",
                &entry.text,
                reason,
            ])?,
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(entries: &[BatchEntry], config: &GastoConfig) -> String {
    let symbol = &config.display.currency_symbol;
    let mut output = String::new();

    for entry in entries {
        match &entry.result {
            ExtractionResult::Success(tx) => output.push_str(&format!(
                "{} {:>14}  {} {:<16} {:<8} {}\n",
                tx.date,
                format_amount(tx.amount, symbol),
                tx.category.emoji(),
                tx.category.label(),
                tx.direction.label(),
                tx.description
            )),
            ExtractionResult::Failure { reason } => {
                output.push_str(&format!("{}:{}  ✗ {}\n", entry.file.display(), entry.line, reason))
            }
        }
    }

    output
}

fn format_summary(summary: &Summary, config: &GastoConfig) -> String {
    let symbol = &config.display.currency_symbol;
    let mut output = String::new();

    output.push_str(&format!("{}\n", style("Summary:").bold()));
    output.push_str(&format!("  Transactions: {}\n", summary.count));
    output.push_str(&format!("  Expenses:     {}\n", format_amount(summary.expense_total, symbol)));
    output.push_str(&format!("  Income:       {}\n", format_amount(summary.income_total, symbol)));
    output.push_str(&format!("  Balance:      {}\n", format_amount(summary.balance(), symbol)));
    output.push_str(&format!("  Mean:         {}\n", format_amount(summary.mean, symbol)));
    output.push_str(&format!("  Median:       {}\n", format_amount(summary.median, symbol)));
    output.push_str(&format!(
        "  Range:        {} - {}\n",
        format_amount(summary.min, symbol),
        format_amount(summary.max, symbol)
    ));

    if !summary.by_category.is_empty() {
        output.push_str("  By category:\n");
        for (category, total) in &summary.by_category {
            output.push_str(&format!(
                "    {} {:<16} {}\n",
                category.emoji(),
                category.label(),
                format_amount(*total, symbol)
            ));
        }
    }

    output
}
