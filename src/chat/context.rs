//! Chat requests and the read-only context handed to generators.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::FragmentSink;
use crate::error::{Result, VoyageError};
use crate::service::FleetSnapshot;

/// One earlier exchange in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// A user message plus the conversation so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
        }
    }

    pub fn with_turn(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.history.push(ChatTurn {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Rejects blank messages.
    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(VoyageError::validation("message", "must not be blank"));
        }
        Ok(())
    }
}

/// What a generator may consult while producing a response.
///
/// Holds its own reference to the snapshot that was current when the chat
/// started, so a concurrent refresh never changes the data mid-response.
#[derive(Debug, Clone)]
pub struct ChatContext {
    snapshot: Arc<FleetSnapshot>,
    summary: String,
}

impl ChatContext {
    pub fn new(snapshot: Arc<FleetSnapshot>) -> Self {
        let summary = render_summary(&snapshot);
        Self { snapshot, summary }
    }

    pub fn snapshot(&self) -> &FleetSnapshot {
        &self.snapshot
    }

    /// Plain-text portfolio summary, one fact per line.
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

fn render_summary(snapshot: &FleetSnapshot) -> String {
    let portfolio = snapshot.portfolio();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Portfolio: {} assignments, total profit ${:.0}, average TCE ${:.0}/day",
        portfolio.num_assignments(),
        portfolio.total_profit,
        portfolio.avg_tce
    );
    for a in &portfolio.assignments {
        let _ = writeln!(
            out,
            "- {} -> {}: profit ${:.0}, TCE ${:.0}/day, arrives {} ({:.1} days margin)",
            a.vessel, a.cargo, a.voyage.net_profit, a.voyage.tce, a.voyage.arrival_date, a.voyage.days_margin
        );
    }
    if !portfolio.unassigned_vessels.is_empty() {
        let _ = writeln!(out, "Unassigned vessels: {}", portfolio.unassigned_vessels.join(", "));
    }
    if !portfolio.unassigned_cargoes.is_empty() {
        let _ = writeln!(out, "Unassigned cargoes: {}", portfolio.unassigned_cargoes.join(", "));
    }
    out
}

/// Produces a response as a sequence of text fragments.
///
/// Implementations push fragments into the sink in order. A send error
/// means the consumer has gone away; generators should return promptly
/// when they see one.
#[async_trait]
pub trait ChatGenerator: Send + Sync {
    async fn generate(&self, request: &ChatRequest, context: &ChatContext, sink: &FragmentSink) -> Result<()>;
}
