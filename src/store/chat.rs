use chrono::{DateTime, Utc};

use crate::effects::Effect;
use crate::error::{ApiError, StoreError};
use crate::model::{
    AccessToken, ChatMessage, ChatRequest, ChatSessionId, ChatTranscript, MessageId, SenderType,
};

use super::{Completion, Pending, RequestSeq, Sequencer};

/// Transcript of the active conversation.
///
/// A sent message shows up immediately as an optimistic entry with a local
/// id; the backend reply then replaces the whole transcript.
#[derive(Debug, Default)]
pub struct ChatStore {
    messages: Vec<ChatMessage>,
    session_id: Option<ChatSessionId>,
    sending: Pending,
    history: Pending,
    error: Option<StoreError>,
    seq: Sequencer,
    next_local: u64,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn session_id(&self) -> Option<&ChatSessionId> {
        self.session_id.as_ref()
    }

    /// The agent is composing a reply.
    pub fn is_typing(&self) -> bool {
        self.sending.is_pending()
    }

    pub fn is_loading_history(&self) -> bool {
        self.history.is_pending()
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Start a new conversation.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.session_id = None;
        self.sending.cancel();
        self.history.cancel();
        self.error = None;
    }

    /// No-op while a send or history reload is in flight, or when `content`
    /// is blank. A history reply replaces the transcript and would drop the
    /// optimistic entry.
    pub fn send_message(
        &mut self,
        token: &AccessToken,
        content: &str,
        now: DateTime<Utc>,
    ) -> Vec<Effect> {
        let content = content.trim();
        if content.is_empty() || self.sending.is_pending() || self.history.is_pending() {
            return Vec::new();
        }

        self.next_local += 1;
        self.messages.push(ChatMessage::new(
            MessageId::local(self.next_local),
            content,
            SenderType::User,
            now,
        ));

        let seq = self.seq.next();
        self.sending.begin(seq);
        vec![Effect::SendChatMessage {
            seq,
            token: token.clone(),
            request: ChatRequest {
                content: content.to_string(),
                session_id: self.session_id.clone(),
            },
        }]
    }

    /// Failed sends keep the optimistic entry so the text is not lost.
    pub fn apply_reply(&mut self, seq: RequestSeq, result: Result<ChatTranscript, ApiError>) -> Completion {
        if !self.sending.settle(seq) {
            tracing::debug!(seq = seq.get(), "discarding stale chat reply");
            return Completion::Stale;
        }
        self.settle(result)
    }

    /// Re-read the transcript of the current conversation.
    pub fn load_history(&mut self, token: &AccessToken) -> Vec<Effect> {
        let Some(session_id) = self.session_id.clone() else {
            return Vec::new();
        };
        if self.history.is_pending() || self.sending.is_pending() {
            return Vec::new();
        }
        let seq = self.seq.next();
        self.history.begin(seq);
        vec![Effect::LoadChatHistory {
            seq,
            token: token.clone(),
            session_id,
        }]
    }

    pub fn apply_history(&mut self, seq: RequestSeq, result: Result<ChatTranscript, ApiError>) -> Completion {
        if !self.history.settle(seq) {
            return Completion::Stale;
        }
        self.settle(result)
    }

    fn settle(&mut self, result: Result<ChatTranscript, ApiError>) -> Completion {
        match result {
            Ok(transcript) => {
                tracing::debug!(
                    session_id = %transcript.session_id,
                    count = transcript.messages.len(),
                    "chat transcript replaced"
                );
                self.messages = transcript.messages;
                self.session_id = Some(transcript.session_id);
                self.error = None;
                Completion::Applied
            }
            Err(e) if e.is_unauthorized() => Completion::Unauthorized,
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                self.error = Some(e.into());
                Completion::Failed
            }
        }
    }
}
