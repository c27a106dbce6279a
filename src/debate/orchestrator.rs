//! The debate state machine.
//!
//! One [`DebateSession`] runs exactly one debate to completion:
//!
//! ```text
//! Start → Opening (Positive, fixed request)
//!       → Round*  (Negative with context, then Positive with context)
//!       → Decision (continuation gate / round limit)
//!       → Terminating (Judge over the full transcript, then persistence)
//!       → Done | Aborted
//! ```
//!
//! All calls are strictly sequential. A failed or empty turn is fatal to the
//! session but never to the process, and never retried: every failure path is
//! a forward transition. Previously appended transcript entries survive any
//! later failure.

use super::pacing::reading_delay;
use super::role::{OPENING_REQUEST, Role};
use crate::provider::{CompletionClient, ProviderError};
use crate::store::{DebateRecord, TranscriptStore};
use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;

/// Session-level knobs.
#[derive(Debug, Clone)]
pub struct DebateConfig {
    /// Maximum rebuttal rounds before forced judgment. 0 means unbounded;
    /// the operator alone decides when to stop.
    pub max_rounds: u32,

    /// Whether to pause for reading time after each turn. Disabled in
    /// non-interactive contexts and tests.
    pub pacing: bool,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            max_rounds: 0,
            pacing: true,
        }
    }
}

/// The per-role completion clients driving one session.
///
/// Each side may point at a different endpoint and model.
pub struct RoleClients {
    pub positive: Arc<dyn CompletionClient>,
    pub negative: Arc<dyn CompletionClient>,
    pub judge: Arc<dyn CompletionClient>,
}

impl RoleClients {
    /// Build the three clients from configuration, applying the judge
    /// credential fallback.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Ok(Self {
            positive: crate::provider::create_client("positive", &config.agents.positive)?,
            negative: crate::provider::create_client("negative", &config.agents.negative)?,
            judge: crate::provider::create_client("judge", &config.agents.resolved_judge())?,
        })
    }

    /// Use one client for all three roles.
    pub fn uniform(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            positive: client.clone(),
            negative: client.clone(),
            judge: client,
        }
    }

    fn for_role(&self, role: Role) -> &dyn CompletionClient {
        match role {
            Role::Positive => self.positive.as_ref(),
            Role::Negative => self.negative.as_ref(),
            Role::Judge => self.judge.as_ref(),
        }
    }
}

/// The human-in-the-loop suspension point after each completed round.
#[async_trait]
pub trait ContinuationGate: Send {
    /// Returns true to run another round, false to move to judgment.
    async fn another_round(&mut self) -> Result<bool>;
}

/// Sink for display events. The orchestrator pushes what happened; how it is
/// rendered (colors, icons, per-fragment delays) is entirely the shell's
/// business.
#[async_trait]
pub trait DebateObserver: Send + Sync {
    async fn round_started(&self, _round: u32) {}
    async fn turn_started(&self, _role: Role) {}
    /// One streamed fragment, in arrival order.
    async fn fragment(&self, _role: Role, _text: &str) {}
    async fn turn_finished(&self, _role: Role, _total_tokens: u32) {}
    async fn turn_failed(&self, _role: Role, _error: &ProviderError) {}
    async fn judging_started(&self) {}
}

/// Observer that renders nothing.
pub struct NullObserver;

#[async_trait]
impl DebateObserver for NullObserver {}

/// How one session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// A debater turn failed; no judgment, nothing persisted.
    Aborted,
    /// The judge call failed; the transcript was not persisted.
    Unjudged,
    /// Judged, but the store rejected the record. The record survives
    /// in memory until process exit.
    SaveFailed { record: DebateRecord },
    /// Judged and persisted.
    Saved { record: DebateRecord, path: PathBuf },
}

/// Runs one debate from topic to persisted record.
pub struct DebateSession {
    clients: RoleClients,
    gate: Box<dyn ContinuationGate>,
    observer: Arc<dyn DebateObserver>,
    store: Arc<dyn TranscriptStore>,
    config: DebateConfig,
}

impl DebateSession {
    pub fn new(
        clients: RoleClients,
        gate: Box<dyn ContinuationGate>,
        observer: Arc<dyn DebateObserver>,
        store: Arc<dyn TranscriptStore>,
        config: DebateConfig,
    ) -> Self {
        Self {
            clients,
            gate,
            observer,
            store,
            config,
        }
    }

    /// Run the debate on `topic` to a terminal state.
    ///
    /// The context handed to each agent is always the topic line followed by
    /// every transcript entry so far, in order; no agent ever sees its own
    /// unfinished output.
    pub async fn run(&mut self, topic: &str) -> Result<SessionOutcome> {
        let mut context: Vec<String> = vec![format!("The topic is: {topic}")];
        let mut transcript: Vec<String> = Vec::new();

        tracing::info!("Debate started: topic={:?}", topic);

        // Opening statement: fixed request, no accumulated context yet.
        match self
            .take_turn(Role::Positive, topic, OPENING_REQUEST)
            .await
        {
            Ok(text) => {
                self.append(Role::Positive, &text, &mut transcript, &mut context);
                self.pace(&text).await;
            }
            Err(e) => {
                tracing::error!("Opening statement failed: {}", e);
                self.observer.turn_failed(Role::Positive, &e).await;
                return Ok(SessionOutcome::Aborted);
            }
        }

        // Rebuttal rounds: Negative then Positive, until the operator (or the
        // configured round limit) calls it.
        let mut round: u32 = 1;
        loop {
            self.observer.round_started(round).await;

            for role in [Role::Negative, Role::Positive] {
                let blob = context.join("\n");
                match self.take_turn(role, topic, &blob).await {
                    Ok(text) => {
                        self.append(role, &text, &mut transcript, &mut context);
                        self.pace(&text).await;
                    }
                    Err(e) => {
                        tracing::error!("{} turn failed in round {}: {}", role, round, e);
                        self.observer.turn_failed(role, &e).await;
                        return Ok(SessionOutcome::Aborted);
                    }
                }
            }

            if self.config.max_rounds > 0 && round >= self.config.max_rounds {
                tracing::info!("Round limit {} reached", self.config.max_rounds);
                break;
            }
            if !self.gate.another_round().await? {
                break;
            }
            round += 1;
        }

        // Judgment over the full transcript.
        self.observer.judging_started().await;
        let debate_text = transcript.join("\n");
        let analysis = match self.take_turn(Role::Judge, topic, &debate_text).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Judge analysis failed: {}", e);
                self.observer.turn_failed(Role::Judge, &e).await;
                return Ok(SessionOutcome::Unjudged);
            }
        };

        let record = DebateRecord::new(topic, transcript, Some(analysis));
        match self.store.save(&record) {
            Ok(path) => {
                tracing::info!("Debate record saved: {:?}", path);
                Ok(SessionOutcome::Saved { record, path })
            }
            Err(e) => {
                tracing::error!("Failed to save debate record: {}", e);
                Ok(SessionOutcome::SaveFailed { record })
            }
        }
    }

    /// Invoke one agent and aggregate its fragment stream into an utterance.
    ///
    /// Fragments are concatenated strictly in arrival order and forwarded to
    /// the observer as they land. An empty aggregate counts as a failure. The
    /// token tally (input instruction+context plus output) goes to the
    /// observer alongside the finished turn.
    async fn take_turn(
        &self,
        role: Role,
        topic: &str,
        content: &str,
    ) -> std::result::Result<String, ProviderError> {
        let client = self.clients.for_role(role);
        let instruction = role.instruction(topic);

        self.observer.turn_started(role).await;

        let mut stream = client.stream_complete(&instruction, content).await?;

        let mut text = String::new();
        while let Some(fragment) = stream.next().await {
            let fragment = fragment?;
            text.push_str(&fragment);
            self.observer.fragment(role, &fragment).await;
        }

        if text.trim().is_empty() {
            return Err(ProviderError::Empty);
        }

        let input_tokens = client.count_tokens(&format!("{instruction}{content}"));
        let output_tokens = client.count_tokens(&text);
        let total_tokens = input_tokens + output_tokens;

        tracing::debug!(
            "{} turn complete: {} chars, ~{} tokens",
            role,
            text.len(),
            total_tokens
        );
        self.observer.turn_finished(role, total_tokens).await;

        Ok(text)
    }

    /// Append a finished utterance to transcript and context in lockstep.
    fn append(
        &self,
        role: Role,
        text: &str,
        transcript: &mut Vec<String>,
        context: &mut Vec<String>,
    ) {
        let entry = format!("{}: {}", role.label(), text);
        transcript.push(entry.clone());
        context.push(entry);
    }

    /// Reading-time pause between turns, skipped when pacing is off.
    async fn pace(&self, text: &str) {
        if self.config.pacing {
            tokio::time::sleep(reading_delay(text)).await;
        }
    }
}
