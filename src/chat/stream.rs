//! Producer task and consumer handle for streamed chat responses.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{ChatContext, ChatEvent, ChatGenerator, ChatRequest};
use crate::error::{Result, VoyageError};

/// The generator's end of a chat stream.
pub struct FragmentSink {
    tx: mpsc::Sender<ChatEvent>,
    cancel: CancellationToken,
}

impl FragmentSink {
    /// Sends one text fragment, waiting for channel space.
    ///
    /// Fails once the consumer has cancelled or dropped the stream.
    pub async fn send(&self, fragment: impl Into<String>) -> Result<()> {
        let closed = || VoyageError::UpstreamGeneration("chat stream closed by consumer".into());
        if self.cancel.is_cancelled() {
            return Err(closed());
        }
        tokio::select! {
            _ = self.cancel.cancelled() => Err(closed()),
            sent = self.tx.send(ChatEvent::Chunk(fragment.into())) => sent.map_err(|_| closed()),
        }
    }

    /// Whether the consumer has gone away.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// The consumer's end of a chat stream.
///
/// Dropping the stream cancels the producer.
pub struct ChatStream {
    rx: mpsc::Receiver<ChatEvent>,
    cancel: CancellationToken,
    finished: bool,
}

impl ChatStream {
    /// Receives the next event; `None` after `Done`.
    pub async fn next(&mut self) -> Option<ChatEvent> {
        if self.finished {
            return None;
        }
        let event = self.rx.recv().await;
        match &event {
            Some(ChatEvent::Done) | None => self.finished = true,
            _ => {}
        }
        event
    }

    /// Stops the producer. Events already queued are still delivered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ChatStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Runs `generator` on a new task and returns the stream of its output.
///
/// Must be called from within a Tokio runtime. A generator error becomes a
/// terminal [`ChatEvent::Error`]; every stream that is not cancelled ends
/// with [`ChatEvent::Done`].
pub fn spawn_chat(
    generator: Arc<dyn ChatGenerator>,
    request: ChatRequest,
    context: ChatContext,
    capacity: usize,
) -> ChatStream {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let cancel = CancellationToken::new();
    let sink = FragmentSink {
        tx: tx.clone(),
        cancel: cancel.clone(),
    };
    let token = cancel.clone();

    tokio::spawn(async move {
        let outcome = tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("chat generation cancelled");
                return;
            }
            outcome = generator.generate(&request, &context, &sink) => outcome,
        };
        if token.is_cancelled() {
            tracing::debug!("chat generation cancelled");
            return;
        }
        if let Err(e) = outcome {
            tracing::warn!(error = %e, "chat generation failed");
            let _ = tx.send(ChatEvent::Error(e.to_string())).await;
        }
        let _ = tx.send(ChatEvent::Done).await;
    });

    ChatStream {
        rx,
        cancel,
        finished: false,
    }
}

/// Drains a stream into the full response text.
///
/// An error event becomes [`VoyageError::UpstreamGeneration`].
pub async fn collect_chat(mut stream: ChatStream) -> Result<String> {
    let mut response = String::new();
    while let Some(event) = stream.next().await {
        match event {
            ChatEvent::Chunk(text) => response.push_str(&text),
            ChatEvent::Error(message) => return Err(VoyageError::UpstreamGeneration(message)),
            ChatEvent::Done => break,
        }
    }
    Ok(response)
}
