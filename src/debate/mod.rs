//! Debate Engine
//!
//! The turn-taking core: role profiles, the session state machine, and the
//! reading-time pacing estimator.

mod orchestrator;
pub mod pacing;
mod role;


pub use orchestrator::{
    ContinuationGate, DebateConfig, DebateObserver, DebateSession, NullObserver, RoleClients,
    SessionOutcome,
};
pub use pacing::reading_delay;
pub use role::{OPENING_REQUEST, Role, RoleProfile};
