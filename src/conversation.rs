// src/conversation.rs
// Ordered chat session that serializes overlapping sends

use crate::api::{ApiClient, ChatMessage};
use crate::error::Result;
use tokio::sync::Mutex;
use tracing::debug;

/// Conversation with the assistant.
///
/// Sends hold the history lock for the whole round trip, so a reply is
/// appended right after the message that produced it and concurrent sends
/// are applied in the order they acquire the lock.
pub struct ChatSession {
    client: ApiClient,
    history: Mutex<Vec<ChatMessage>>,
}

impl ChatSession {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Start the conversation with an assistant greeting
    pub fn with_greeting(client: ApiClient, greeting: impl Into<String>) -> Self {
        Self {
            client,
            history: Mutex::new(vec![ChatMessage::assistant(greeting)]),
        }
    }

    /// Send a user message and return the assistant's reply.
    /// On failure the user message is dropped so the history is unchanged.
    pub async fn send(&self, text: &str) -> Result<String> {
        let mut history = self.history.lock().await;
        history.push(ChatMessage::user(text));

        match self.client.chat(&history).await {
            Ok(reply) => {
                history.push(ChatMessage::assistant(reply.reply.clone()));
                debug!(turns = history.len(), "Chat reply appended");
                Ok(reply.reply)
            }
            Err(e) => {
                history.pop();
                Err(e)
            }
        }
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.history.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.history.lock().await.clear();
    }
}
