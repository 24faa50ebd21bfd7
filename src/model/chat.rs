use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ChatSessionId, MessageId};
use super::serde_utils::flexible_utc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    User,
    Agent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub sender_type: SenderType,
    #[serde(with = "flexible_utc")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        content: impl Into<String>,
        sender_type: SenderType,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            sender_type,
            timestamp,
        }
    }

    pub fn is_optimistic(&self) -> bool {
        self.id.is_local()
    }
}

/// Body of `POST /chat/`. `session_id` is sent as `null` to open a new chat.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub content: String,
    pub session_id: Option<ChatSessionId>,
}

/// Full history of one chat session, as returned by every chat endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChatTranscript {
    pub session_id: ChatSessionId,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}
