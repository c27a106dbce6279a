//! Interactive terminal shell.
//!
//! The session controller: a root menu offering a new debate or the history
//! browser, the topic prompt, and the y/n continuation gate. Everything here
//! is presentation; the debate engine never sees how choices are rendered.

mod display;
mod menu;

pub use display::TerminalObserver;

use crate::config::Config;
use crate::debate::{
    ContinuationGate, DebateConfig, DebateSession, RoleClients, SessionOutcome,
};
use crate::store::{FileStore, TranscriptStore};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::style::Stylize;
use std::io::Write;
use std::sync::Arc;

/// Top-level interactive loop.
pub async fn run_interactive(config: Config) -> Result<()> {
    display::info("Welcome to Podium, the AI debate arena!");

    loop {
        let options = vec![
            "Start a new debate".to_string(),
            "View debate history".to_string(),
            "Quit".to_string(),
        ];
        match menu::select("Use ↑/↓ to choose, Enter to confirm:", &options)? {
            Some(0) => {
                let topic = prompt_line("Debate topic: ").await?;
                if topic.trim().is_empty() {
                    display::notice("No topic given.");
                    continue;
                }
                run_debate(&config, topic.trim(), None, false).await?;
            }
            Some(1) => browse_history(&config).await?,
            _ => break,
        }
    }

    display::info("Thanks for using Podium. Goodbye!");
    Ok(())
}

/// Run one debate session, racing it against ctrl-c.
///
/// An interrupt abandons the in-flight turn by dropping the session future;
/// nothing partial is committed and control returns to the caller.
pub async fn run_debate(
    config: &Config,
    topic: &str,
    max_rounds: Option<u32>,
    no_pacing: bool,
) -> Result<()> {
    let clients = RoleClients::from_config(config)?;
    let store: Arc<dyn TranscriptStore> =
        Arc::new(FileStore::new(config.storage.debates_dir.clone()));
    let session_config = DebateConfig {
        max_rounds: max_rounds.unwrap_or(config.debate.max_rounds),
        pacing: config.debate.pacing && !no_pacing,
    };

    let mut session = DebateSession::new(
        clients,
        Box::new(StdinGate),
        Arc::new(TerminalObserver),
        store,
        session_config,
    );

    display::info(&format!("Starting a debate on '{topic}'..."));
    display::notice("After each round you can choose whether to continue.");

    tokio::select! {
        outcome = session.run(topic) => report(outcome?),
        _ = tokio::signal::ctrl_c() => {
            display::notice("Debate interrupted.");
        }
    }
    Ok(())
}

/// Translate a session outcome into operator-visible messages.
fn report(outcome: SessionOutcome) {
    match outcome {
        SessionOutcome::Aborted => {
            display::error("The debate was aborted: an agent failed to respond.");
        }
        SessionOutcome::Unjudged => {
            display::notice("No verdict could be obtained; the debate was not saved.");
        }
        SessionOutcome::SaveFailed { .. } => {
            display::error("The debate finished but the record could not be saved.");
        }
        SessionOutcome::Saved { path, .. } => {
            println!("{}", "===================================".magenta());
            display::info(&format!("Debate record saved to: {}", path.display()));
        }
    }
}

/// Newest-first history browser with replay.
async fn browse_history(config: &Config) -> Result<()> {
    let store = FileStore::new(config.storage.debates_dir.clone());
    let records = store.list_all()?;
    if records.is_empty() {
        display::notice("No saved debates yet.");
        return Ok(());
    }

    loop {
        let mut options: Vec<String> = records
            .iter()
            .map(|r| format!("{} - {}", r.timestamp, r.topic))
            .collect();
        options.push("Back to main menu".to_string());

        match menu::select("Saved debates:", &options)? {
            Some(i) if i < records.len() => {
                display::replay(&records[i]).await;
                prompt_line("Press Enter to return...").await?;
            }
            _ => return Ok(()),
        }
    }
}

/// Blocking y/n prompt after every completed round.
struct StdinGate;

#[async_trait]
impl ContinuationGate for StdinGate {
    async fn another_round(&mut self) -> Result<bool> {
        loop {
            let answer = prompt_line_colored("\nContinue the debate? (y/n): ").await?;
            match answer.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => display::error("Please enter y or n"),
            }
        }
    }
}

async fn prompt_line_colored(prompt: &str) -> Result<String> {
    print!("{}", prompt.yellow());
    std::io::stdout().flush()?;
    read_stdin_line().await
}

async fn prompt_line(prompt: &str) -> Result<String> {
    print!("\n{}", prompt.yellow());
    std::io::stdout().flush()?;
    read_stdin_line().await
}

/// Read one line without blocking the runtime.
async fn read_stdin_line() -> Result<String> {
    let line = tokio::task::spawn_blocking(|| {
        let mut buf = String::new();
        std::io::stdin().read_line(&mut buf).map(|_| buf)
    })
    .await??;
    Ok(line)
}
