//! Podium - Terminal AI Debate Arena
//!
//! Two language models argue a user-supplied topic in alternating turns while
//! a third acts as judge. Output streams live to the terminal, the exchange is
//! paced for human reading, and every finished debate is persisted as a JSON
//! record that can be replayed later.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive menu
//! podium
//!
//! # Start a debate directly
//! podium debate "Remote work is better than office work"
//!
//! # List saved debates
//! podium history
//! ```

pub mod cli;
pub mod config;
pub mod debate;
pub mod logging;
pub mod provider;
pub mod store;
pub mod tui;

// Re-export commonly used types
pub use debate::{DebateSession, Role, SessionOutcome};
pub use store::DebateRecord;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
