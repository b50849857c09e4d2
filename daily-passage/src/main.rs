//! daily-passage - Publish the next stored passage, wrapping after the last

use anyhow::{Context, Result};
use clap::Parser;
use passage_core::{Config, ConsoleSink, JsonProgressStore, Publisher, load_passages};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "daily-passage")]
#[command(
    about = "Show the next passage from the store",
    long_about = "Loads the passage store written by chunk-passages, prints the passage after the \
                  last one shown, and records its index so the next run continues from there"
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

    let passages = load_passages(&config.store_file)
        .with_context(|| format!("Failed to load passages from {}", config.store_file.display()))?;

    let progress = JsonProgressStore::new(&config.progress_file);
    let sink = ConsoleSink::new(config.title.clone());
    let mut publisher = Publisher::new(passages, progress, sink, config.max_characters);

    let post = publisher.publish_next().context("Failed to publish passage")?;
    log::info!(
        "Posted passage {}/{} ({} characters)",
        post.index + 1,
        post.total,
        post.text.chars().count()
    );

    Ok(())
}
