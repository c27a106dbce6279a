//! Podium entry point.

use anyhow::Result;
use clap::Parser;
use podium::cli::{Cli, Commands};
use podium::config::Config;
use podium::store::{FileStore, TranscriptStore};
use podium::{logging, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    // Guard keeps file logging alive until exit.
    let _log_guard = logging::init(&config.logging, cli.debug)?;

    match cli.command {
        Some(Commands::Debate {
            topic,
            max_rounds,
            no_pacing,
        }) => tui::run_debate(&config, topic.trim(), max_rounds, no_pacing).await,
        Some(Commands::History) => print_history(&config),
        Some(Commands::Config) => {
            println!("{}", config.redacted_toml()?);
            Ok(())
        }
        None => tui::run_interactive(config).await,
    }
}

/// Non-interactive history listing, newest first.
fn print_history(config: &Config) -> Result<()> {
    let store = FileStore::new(config.storage.debates_dir.clone());
    let records = store.list_all()?;

    if records.is_empty() {
        println!("No saved debates.");
        return Ok(());
    }

    for record in records {
        let verdict = if record.judge_analysis.is_some() {
            "judged"
        } else {
            "no verdict"
        };
        println!(
            "{}  {}  ({} turns, {})",
            record.timestamp,
            record.topic,
            record.debate_history.len(),
            verdict
        );
    }
    Ok(())
}
