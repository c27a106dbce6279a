//! CLI Module
//!
//! Command-line interface for Podium using Clap v4. Running without a
//! subcommand opens the interactive menu.

use clap::{Parser, Subcommand};

/// Podium - Terminal AI Debate Arena
#[derive(Parser, Debug)]
#[command(name = "podium")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug mode (writes log files to ~/.podium/logs/)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a debate on the given topic
    Debate {
        /// The debate topic
        topic: String,

        /// Maximum rebuttal rounds (overrides config; 0 = unbounded)
        #[arg(long)]
        max_rounds: Option<u32>,

        /// Skip reading-time pauses between turns
        #[arg(long)]
        no_pacing: bool,
    },

    /// List saved debates, newest first
    History,

    /// Show resolved configuration (API keys redacted)
    Config,
}
