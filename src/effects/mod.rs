//! Side effects requested by `update`.
//!
//! `update` stays pure: it returns `Effect` values and `EffectRunner` turns
//! them into backend calls, token file writes and socket management. Backend
//! results come back into the loop as `AppEvent`s.

pub mod notifications;

use std::sync::Arc;

use tokio::sync::mpsc;

pub use notifications::{Backoff, Delivery, NotificationListener};

use crate::event::AppEvent;
use crate::model::{
    AccessToken, ChatRequest, ChatSessionId, Credentials, NewTask, ProfileUpdate, TaskChanges,
    TaskId, User, UserId,
};
use crate::storage::TokenStore;
use crate::store::RequestSeq;
use crate::transport::{ApiResult, Backend};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Login {
        seq: RequestSeq,
        credentials: Credentials,
    },
    /// Create the account, then log in with the same credentials.
    Register {
        seq: RequestSeq,
        credentials: Credentials,
    },
    /// Resolve the user behind a token restored from disk.
    ValidateToken {
        seq: RequestSeq,
        token: AccessToken,
    },
    UpdateProfile {
        seq: RequestSeq,
        token: AccessToken,
        update: ProfileUpdate,
    },
    DeleteAccount {
        seq: RequestSeq,
        token: AccessToken,
    },
    RefreshTasks {
        seq: RequestSeq,
        token: AccessToken,
    },
    CreateTask {
        seq: RequestSeq,
        token: AccessToken,
        task: NewTask,
    },
    UpdateTask {
        seq: RequestSeq,
        token: AccessToken,
        id: TaskId,
        changes: TaskChanges,
    },
    DeleteTask {
        seq: RequestSeq,
        token: AccessToken,
        id: TaskId,
    },
    SendChatMessage {
        seq: RequestSeq,
        token: AccessToken,
        request: ChatRequest,
    },
    LoadChatHistory {
        seq: RequestSeq,
        token: AccessToken,
        session_id: ChatSessionId,
    },
    SaveToken(AccessToken),
    ClearToken,
    ConnectNotifications {
        user_id: UserId,
    },
    DisconnectNotifications,
}

/// Run a backend effect to completion. Local effects yield `None`.
pub async fn execute(backend: &dyn Backend, effect: Effect) -> Option<AppEvent> {
    let event = match effect {
        Effect::Login { seq, credentials } => AppEvent::SessionValidated {
            seq,
            result: login(backend, &credentials).await,
        },
        Effect::Register { seq, credentials } => {
            let result = match backend.register(&credentials).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "account created");
                    login(backend, &credentials).await
                }
                Err(e) => Err(e),
            };
            AppEvent::SessionValidated { seq, result }
        }
        Effect::ValidateToken { seq, token } => {
            let result = backend.current_user(&token).await.map(|user| (token, user));
            AppEvent::SessionValidated { seq, result }
        }
        Effect::UpdateProfile { seq, token, update } => AppEvent::ProfileUpdated {
            seq,
            result: backend.update_user(&token, &update).await,
        },
        Effect::DeleteAccount { seq, token } => AppEvent::AccountDeleted {
            seq,
            result: backend.delete_user(&token).await,
        },
        Effect::RefreshTasks { seq, token } => AppEvent::TasksLoaded {
            seq,
            result: backend.list_tasks(&token).await,
        },
        Effect::CreateTask { seq, token, task } => AppEvent::TaskCreated {
            seq,
            result: backend.create_task(&token, &task).await,
        },
        Effect::UpdateTask {
            seq,
            token,
            id,
            changes,
        } => AppEvent::TaskUpdated {
            seq,
            result: backend.update_task(&token, id, &changes).await,
        },
        Effect::DeleteTask { seq, token, id } => AppEvent::TaskDeleted {
            seq,
            id,
            result: backend.delete_task(&token, id).await,
        },
        Effect::SendChatMessage {
            seq,
            token,
            request,
        } => AppEvent::ChatReplied {
            seq,
            result: backend.send_chat_message(&token, &request).await,
        },
        Effect::LoadChatHistory {
            seq,
            token,
            session_id,
        } => AppEvent::ChatHistoryLoaded {
            seq,
            result: backend.chat_history(&token, &session_id).await,
        },
        Effect::SaveToken(_)
        | Effect::ClearToken
        | Effect::ConnectNotifications { .. }
        | Effect::DisconnectNotifications => return None,
    };
    Some(event)
}

/// Token exchange followed by identity lookup.
async fn login(backend: &dyn Backend, credentials: &Credentials) -> ApiResult<(AccessToken, User)> {
    let token = backend.login(credentials).await?.token();
    let user = backend.current_user(&token).await?;
    Ok((token, user))
}

/// Owns everything with side effects: backend, token file, socket.
pub struct EffectRunner {
    backend: Arc<dyn Backend>,
    tokens: Box<dyn TokenStore>,
    events: mpsc::UnboundedSender<AppEvent>,
    listener: NotificationListener,
}

impl EffectRunner {
    pub fn new(
        backend: Arc<dyn Backend>,
        tokens: Box<dyn TokenStore>,
        events: mpsc::UnboundedSender<AppEvent>,
        listener: NotificationListener,
    ) -> Self {
        Self {
            backend,
            tokens,
            events,
            listener,
        }
    }

    /// Token that survived the last run, if any. Read failures are reported
    /// and treated as no token.
    pub fn restore_token(&self) -> Option<AccessToken> {
        match self.tokens.load() {
            Ok(token) => token,
            Err(e) => {
                self.report("token store", e.to_string());
                None
            }
        }
    }

    pub fn run_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    /// Local effects run inline, backend effects on their own task.
    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::SaveToken(token) => {
                if let Err(e) = self.tokens.save(&token) {
                    self.report("token store", e.to_string());
                }
            }
            Effect::ClearToken => {
                if let Err(e) = self.tokens.clear() {
                    self.report("token store", e.to_string());
                }
            }
            Effect::ConnectNotifications { user_id } => {
                self.listener.connect(user_id, self.events.clone());
            }
            Effect::DisconnectNotifications => self.listener.disconnect(),
            remote => {
                let backend = Arc::clone(&self.backend);
                let events = self.events.clone();
                tokio::spawn(async move {
                    if let Some(event) = execute(backend.as_ref(), remote).await {
                        if events.send(event).is_err() {
                            tracing::debug!("event loop closed, dropping backend result");
                        }
                    }
                });
            }
        }
    }

    fn report(&self, source: &str, error: String) {
        tracing::error!(source, %error, "effect failed");
        let _ = self.events.send(AppEvent::Error {
            source: source.to_string(),
            error,
        });
    }
}
