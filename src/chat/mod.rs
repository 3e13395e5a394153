//! Streamed chat over the fleet snapshot.
//!
//! - [`ChatGenerator`] — Pluggable text generator (async trait)
//! - [`spawn_chat`] — Runs a generator on its own task behind a bounded
//!   channel; the returned [`ChatStream`] cancels it when dropped
//! - [`ChatEvent`] — Stream events with SSE framing
//! - [`SnapshotBriefing`] — Built-in generator answering from cached results

mod briefing;
mod context;
mod event;
mod stream;

pub use briefing::SnapshotBriefing;
pub use context::{ChatContext, ChatGenerator, ChatRequest, ChatTurn};
pub use event::ChatEvent;
pub use stream::{collect_chat, spawn_chat, ChatStream, FragmentSink};
