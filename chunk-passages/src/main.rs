//! chunk-passages - Split a plain-text classic into book/chapter passages

mod source;
mod text;

use anyhow::{Context, Result};
use clap::Parser;
use passage_core::{Config, PassageStats, save_passages};
use std::process::ExitCode;
use text::RomanMarkerClassifier;

/// Characters of the first passage shown after a run.
const PREVIEW_CHARS: usize = 300;

#[derive(Parser, Debug)]
#[command(name = "chunk-passages")]
#[command(
    about = "Split a plain-text classic into passages sized for posting",
    long_about = "Reads the configured source text, splits every chapter at sentence, clause or \
                  word boundaries, and writes the passages to the JSON store used by daily-passage"
)]
#[command(version)]
struct Args {}

fn main() -> ExitCode {
    let _args = Args::parse();
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn run() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let source_path = &config.source_file;

    if !source_path.exists() {
        anyhow::bail!("Source file not found: {}", source_path.display());
    }

    log::info!("Reading {}", source_path.display());
    let content = std::fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read {} as UTF-8 text", source_path.display()))?;

    let passages = source::parse_source(&content, &RomanMarkerClassifier, config.max_characters)
        .context("Failed to split source text")?;

    save_passages(&config.store_file, &passages)
        .with_context(|| format!("Failed to write {}", config.store_file.display()))?;

    let stats = PassageStats::from_passages(&passages);
    println!(
        "Processing complete! Saved {} passages to {}.",
        stats.total,
        config.store_file.display()
    );
    println!(
        "Average passage length: {} characters (longest {})",
        stats.average_chars, stats.longest_chars
    );

    if let Some(first) = passages.first() {
        let preview: String = first.text.chars().take(PREVIEW_CHARS).collect();
        println!("\nFirst passage preview:");
        println!("Book: {}", first.book);
        println!("Chapter: {}", first.chapter);
        println!("\n{}...", preview);
    }

    Ok(())
}
