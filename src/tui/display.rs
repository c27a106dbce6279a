//! Colorized terminal rendering of a running debate.

use crate::debate::{DebateObserver, Role};
use crate::provider::ProviderError;
use crate::store::DebateRecord;
use async_trait::async_trait;
use crossterm::style::Stylize;
use std::io::{self, Write};
use std::time::Duration;

/// Per-fragment display delay, so streamed text lands at a readable rate.
const DEBATER_FRAGMENT_DELAY: Duration = Duration::from_millis(80);
const JUDGE_FRAGMENT_DELAY: Duration = Duration::from_millis(20);

/// Pause between entries when replaying a saved debate.
const REPLAY_ENTRY_DELAY: Duration = Duration::from_millis(500);

const SYSTEM_ICON: &str = "🔧";

/// Renders debate events as colored, paced terminal output.
pub struct TerminalObserver;

#[async_trait]
impl DebateObserver for TerminalObserver {
    async fn round_started(&self, round: u32) {
        println!("\n{} {}", SYSTEM_ICON, format!("=== Round {round} ===").cyan());
    }

    async fn turn_started(&self, role: Role) {
        let profile = role.profile();
        print!("\n{} {}: ", profile.icon, profile.label.with(profile.color));
        let _ = io::stdout().flush();
    }

    async fn fragment(&self, role: Role, text: &str) {
        print!("{}", text.with(role.profile().color));
        let _ = io::stdout().flush();
        let delay = match role {
            Role::Judge => JUDGE_FRAGMENT_DELAY,
            _ => DEBATER_FRAGMENT_DELAY,
        };
        tokio::time::sleep(delay).await;
    }

    async fn turn_finished(&self, _role: Role, total_tokens: u32) {
        println!(" {}", format!("[{total_tokens}]").grey());
    }

    async fn turn_failed(&self, role: Role, error: &ProviderError) {
        println!(
            "\n{} {}",
            SYSTEM_ICON,
            format!("{role} turn failed: {error}").red()
        );
    }

    async fn judging_started(&self) {
        println!(
            "\n{} {}",
            SYSTEM_ICON,
            "Requesting the judge's verdict...".yellow()
        );
        println!("\n{}", "========= Judge's Verdict =========".magenta());
    }
}

/// System-level status lines.
pub fn info(message: &str) {
    println!("{} {}", SYSTEM_ICON, message.green());
}

pub fn notice(message: &str) {
    println!("{} {}", SYSTEM_ICON, message.yellow());
}

pub fn error(message: &str) {
    println!("{} {}", SYSTEM_ICON, message.red());
}

/// Replay a saved debate, entry by entry.
pub async fn replay(record: &DebateRecord) {
    println!("\n{}", "========= Saved Debate =========".cyan());
    println!("{}", format!("Topic: {}", record.topic).cyan());
    println!("{}", format!("Time:  {}", record.timestamp).cyan());
    println!();

    for entry in &record.debate_history {
        let styled = if entry.starts_with(Role::Positive.label()) {
            format!("{} {}", Role::Positive.profile().icon, entry).blue()
        } else if entry.starts_with(Role::Negative.label()) {
            format!("{} {}", Role::Negative.profile().icon, entry).red()
        } else {
            entry.clone().stylize()
        };
        println!("{styled}");
        tokio::time::sleep(REPLAY_ENTRY_DELAY).await;
    }

    if let Some(analysis) = &record.judge_analysis {
        println!("\n{}", "========= Judge's Verdict =========".magenta());
        println!(
            "{} {}",
            Role::Judge.profile().icon,
            analysis.as_str().magenta()
        );
        println!("{}", "===================================".magenta());
    }
}
