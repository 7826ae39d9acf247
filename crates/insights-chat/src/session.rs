//! Per-run chat session: a client plus the transcript it feeds.

use insights_core::error::Result;
use insights_core::models::{ChatHistory, Speaker};

use crate::client::ChatClient;

/// Assistant turn every new transcript starts with.
pub const GREETING: &str = "Hi! I'm your AI assistant. How can I help you today?";

/// One user's conversation with the assistant for the lifetime of the app.
///
/// The transcript is append-only: a user turn and its reply are recorded
/// together, and a failed request records neither, so the history never shows
/// a question without an answer.
pub struct ChatSession {
    client: ChatClient,
    history: ChatHistory,
}

impl ChatSession {
    /// Start a session with the greeting already in the transcript.
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            history: ChatHistory::with_greeting(GREETING),
        }
    }

    /// Send a user message and record the exchange on success.
    pub async fn send(&mut self, message: &str) -> Result<String> {
        let reply = self.client.send(message).await?;
        self.record_exchange(message, &reply);
        Ok(reply)
    }

    /// Append a user turn and its reply to the transcript.
    pub fn record_exchange(&mut self, message: &str, reply: &str) {
        self.history.push(Speaker::User, message);
        self.history.push(Speaker::Assistant, reply);
    }

    /// The transcript so far, greeting included.
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
