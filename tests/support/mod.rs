//! Shared fixtures for the integration tests: an in-memory backend that
//! behaves like the real one, a token store without a file, and a driver
//! that runs effects to completion the way `EffectRunner` does.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdesk_tui::app::{update, AppState};
use taskdesk_tui::effects::{execute, Effect};
use taskdesk_tui::error::{ApiError, StorageError};
use taskdesk_tui::model::{
    AccessToken, ChatMessage, ChatRequest, ChatSessionId, ChatTranscript, Credentials, MessageId,
    NewTask, ProfileUpdate, SenderType, Task, TaskChanges, TaskId, TokenResponse, User,
};
use taskdesk_tui::storage::TokenStore;
use taskdesk_tui::transport::{ApiResult, Backend};

#[derive(Default)]
struct Db {
    users: Vec<(User, String)>,
    tokens: HashMap<String, i64>,
    tasks: Vec<Task>,
    chats: HashMap<String, Vec<ChatMessage>>,
    next_id: i64,
    calls: HashMap<&'static str, usize>,
}

impl Db {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn record(&mut self, call: &'static str) {
        *self.calls.entry(call).or_default() += 1;
    }

    fn authorize(&self, token: &AccessToken) -> ApiResult<User> {
        self.tokens
            .get(token.as_str())
            .and_then(|id| self.users.iter().find(|(u, _)| u.id.get() == *id))
            .map(|(u, _)| u.clone())
            .ok_or_else(unauthorized)
    }

    fn issue(&mut self, user_id: i64) -> AccessToken {
        let token = format!("token-{}-{}", user_id, self.tokens.len() + 1);
        self.tokens.insert(token.clone(), user_id);
        AccessToken::new(token)
    }
}

fn unauthorized() -> ApiError {
    ApiError::Api {
        status: 401,
        message: "Could not validate credentials".into(),
    }
}

fn not_found() -> ApiError {
    ApiError::Api {
        status: 404,
        message: "Task not found".into(),
    }
}

/// Backend double keeping users, tokens, tasks and chats in memory.
#[derive(Default)]
pub struct FakeBackend {
    db: Mutex<Db>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, username: &str, password: &str) -> Self {
        {
            let mut db = self.db.lock().unwrap();
            let id = db.next_id();
            db.users.push((User::new(id, username), password.to_string()));
        }
        self
    }

    /// Token for an existing user, as if they had logged in earlier.
    pub fn issue_token(&self, username: &str) -> AccessToken {
        let mut db = self.db.lock().unwrap();
        let id = db
            .users
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.id.get())
            .unwrap();
        db.issue(id)
    }

    /// Every token stops being honoured, as after a server-side expiry.
    pub fn revoke_tokens(&self) {
        self.db.lock().unwrap().tokens.clear();
    }

    pub fn calls(&self, call: &str) -> usize {
        self.db.lock().unwrap().calls.get(call).copied().unwrap_or(0)
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.db.lock().unwrap().tasks.clone()
    }

    pub fn usernames(&self) -> Vec<String> {
        self.db
            .lock()
            .unwrap()
            .users
            .iter()
            .map(|(u, _)| u.username.clone())
            .collect()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        let mut db = self.db.lock().unwrap();
        db.record("login");
        let id = db
            .users
            .iter()
            .find(|(u, p)| u.username == credentials.username && *p == credentials.password)
            .map(|(u, _)| u.id.get())
            .ok_or_else(|| ApiError::Api {
                status: 401,
                message: "Incorrect username or password".into(),
            })?;
        let token = db.issue(id);
        Ok(TokenResponse {
            access_token: token.as_str().to_string(),
            token_type: "bearer".into(),
        })
    }

    async fn register(&self, credentials: &Credentials) -> ApiResult<User> {
        let mut db = self.db.lock().unwrap();
        db.record("register");
        if db.users.iter().any(|(u, _)| u.username == credentials.username) {
            return Err(ApiError::Api {
                status: 400,
                message: "Username already registered".into(),
            });
        }
        let id = db.next_id();
        let user = User::new(id, credentials.username.clone());
        db.users.push((user.clone(), credentials.password.clone()));
        Ok(user)
    }

    async fn current_user(&self, token: &AccessToken) -> ApiResult<User> {
        let mut db = self.db.lock().unwrap();
        db.record("current_user");
        db.authorize(token)
    }

    async fn update_user(&self, token: &AccessToken, update: &ProfileUpdate) -> ApiResult<User> {
        let mut db = self.db.lock().unwrap();
        db.record("update_user");
        let user = db.authorize(token)?;
        let (stored, password) = db
            .users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or_else(unauthorized)?;
        if let Some(username) = &update.username {
            stored.username = username.clone();
        }
        if let Some(new_password) = &update.password {
            *password = new_password.clone();
        }
        Ok(stored.clone())
    }

    async fn delete_user(&self, token: &AccessToken) -> ApiResult<()> {
        let mut db = self.db.lock().unwrap();
        db.record("delete_user");
        let user = db.authorize(token)?;
        db.users.retain(|(u, _)| u.id != user.id);
        db.tokens.retain(|_, id| *id != user.id.get());
        Ok(())
    }

    async fn list_tasks(&self, token: &AccessToken) -> ApiResult<Vec<Task>> {
        let mut db = self.db.lock().unwrap();
        db.record("list_tasks");
        db.authorize(token)?;
        Ok(db.tasks.clone())
    }

    async fn create_task(&self, token: &AccessToken, task: &NewTask) -> ApiResult<Task> {
        let mut db = self.db.lock().unwrap();
        db.record("create_task");
        db.authorize(token)?;
        let id = db.next_id();
        let mut created = Task::new(id, task.title.clone(), task.description.clone());
        created.deadline = task.deadline.clone();
        db.tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(
        &self,
        token: &AccessToken,
        id: TaskId,
        changes: &TaskChanges,
    ) -> ApiResult<Task> {
        let mut db = self.db.lock().unwrap();
        db.record("update_task");
        db.authorize(token)?;
        let task = db.tasks.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
        task.title = changes.title.clone();
        task.description = changes.description.clone();
        task.completed = changes.completed;
        task.deadline = changes.deadline.clone();
        Ok(task.clone())
    }

    async fn delete_task(&self, token: &AccessToken, id: TaskId) -> ApiResult<()> {
        let mut db = self.db.lock().unwrap();
        db.record("delete_task");
        db.authorize(token)?;
        let before = db.tasks.len();
        db.tasks.retain(|t| t.id != id);
        if db.tasks.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn send_chat_message(
        &self,
        token: &AccessToken,
        request: &ChatRequest,
    ) -> ApiResult<ChatTranscript> {
        let mut db = self.db.lock().unwrap();
        db.record("send_chat_message");
        db.authorize(token)?;
        let session_id = match &request.session_id {
            Some(id) => id.as_str().to_string(),
            None => format!("chat-{}", db.chats.len() + 1),
        };
        let n = db.next_id();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let messages = db.chats.entry(session_id.clone()).or_default();
        messages.push(ChatMessage::new(
            MessageId::server(format!("m{}", n)),
            request.content.clone(),
            SenderType::User,
            at,
        ));
        messages.push(ChatMessage::new(
            MessageId::server(format!("m{}r", n)),
            format!("echo: {}", request.content),
            SenderType::Agent,
            at,
        ));
        Ok(ChatTranscript {
            session_id: ChatSessionId::new(session_id),
            messages: messages.clone(),
        })
    }

    async fn chat_history(
        &self,
        token: &AccessToken,
        session_id: &ChatSessionId,
    ) -> ApiResult<ChatTranscript> {
        let mut db = self.db.lock().unwrap();
        db.record("chat_history");
        db.authorize(token)?;
        let messages = db.chats.get(session_id.as_str()).cloned().ok_or(ApiError::Api {
            status: 404,
            message: "Chat session not found".into(),
        })?;
        Ok(ChatTranscript {
            session_id: session_id.clone(),
            messages,
        })
    }
}

/// Token store shared between "runs" of the client.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token))),
        }
    }

    pub fn current(&self) -> Option<AccessToken> {
        self.token.lock().unwrap().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AccessToken>, StorageError> {
        Ok(self.current())
    }

    fn save(&mut self, token: &AccessToken) -> Result<(), StorageError> {
        *self.token.lock().unwrap() = Some(token.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

/// Run effects and every effect they lead to, one at a time, feeding each
/// backend result back through `update`. Socket effects are ignored.
pub async fn drive(
    state: &mut AppState,
    backend: &FakeBackend,
    tokens: &mut MemoryTokenStore,
    effects: Vec<Effect>,
) {
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::SaveToken(token) => tokens.save(&token).unwrap(),
            Effect::ClearToken => tokens.clear().unwrap(),
            Effect::ConnectNotifications { .. } | Effect::DisconnectNotifications => {}
            remote => {
                if let Some(event) = execute(backend, remote).await {
                    queue.extend(update(state, event));
                }
            }
        }
    }
}

/// Log `username` in through the session store and settle everything.
pub async fn logged_in(
    backend: &FakeBackend,
    tokens: &mut MemoryTokenStore,
    username: &str,
    password: &str,
) -> AppState {
    let mut state = AppState::new();
    let effects = state.session.login(username, password);
    drive(&mut state, backend, tokens, effects).await;
    assert!(state.session.is_authenticated(), "login failed: {:?}", state.session.state());
    state
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn type_text(state: &mut AppState, text: &str) -> Vec<Effect> {
    let mut effects = Vec::new();
    for c in text.chars() {
        effects.extend(update(state, taskdesk_tui::event::AppEvent::Key(char_key(c))));
    }
    effects
}

/// State right after a successful login as `alice`, without a backend.
/// Returns the effects the login produced (token save, refresh, socket).
pub fn signed_in() -> (AppState, Vec<Effect>) {
    let mut state = AppState::new();
    let seq = match state.session.login("alice", "password1").first() {
        Some(Effect::Login { seq, .. }) => *seq,
        other => panic!("expected login effect, got {:?}", other),
    };
    let effects = update(
        &mut state,
        taskdesk_tui::event::AppEvent::SessionValidated {
            seq,
            result: Ok((AccessToken::new("tok"), User::new(1, "alice"))),
        },
    );
    (state, effects)
}

/// `signed_in` with the task list already loaded.
pub fn signed_in_with_tasks(tasks: Vec<Task>) -> AppState {
    let (mut state, effects) = signed_in();
    let seq = effects
        .iter()
        .find_map(|e| match e {
            Effect::RefreshTasks { seq, .. } => Some(*seq),
            _ => None,
        })
        .unwrap();
    update(
        &mut state,
        taskdesk_tui::event::AppEvent::TasksLoaded {
            seq,
            result: Ok(tasks),
        },
    );
    state
}
