//! Chat stream events and their server-sent-event framing.

use serde::{Deserialize, Serialize};

/// One message of a chat response stream.
///
/// A well-formed stream is any number of `Chunk`s, at most one `Error`,
/// then exactly one `Done`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ChatEvent {
    /// A fragment of generated text, in order.
    Chunk(String),
    /// Generation failed; no more chunks follow.
    Error(String),
    /// End of stream.
    Done,
}

impl ChatEvent {
    /// Whether this event ends the stream.
    pub fn is_done(&self) -> bool {
        matches!(self, ChatEvent::Done)
    }

    /// Renders the event as one SSE frame.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_voyage::chat::ChatEvent;
    ///
    /// assert_eq!(ChatEvent::Chunk("Hi".into()).to_sse(), "data: {\"content\":\"Hi\"}\n\n");
    /// assert_eq!(ChatEvent::Done.to_sse(), "data: [DONE]\n\n");
    /// ```
    pub fn to_sse(&self) -> String {
        let payload = match self {
            ChatEvent::Chunk(content) => serde_json::json!({ "content": content }).to_string(),
            ChatEvent::Error(message) => serde_json::json!({ "error": message }).to_string(),
            ChatEvent::Done => "[DONE]".to_string(),
        };
        format!("data: {payload}\n\n")
    }
}
