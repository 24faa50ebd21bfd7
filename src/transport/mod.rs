//! Backend access. One method per backend capability; authenticated calls
//! take the bearer token explicitly so no request ever picks up a token
//! from ambient state.

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::model::{
    AccessToken, ChatRequest, ChatSessionId, ChatTranscript, Credentials, NewTask, ProfileUpdate,
    Task, TaskChanges, TaskId, TokenResponse, User,
};

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse>;

    /// `POST /users/`
    async fn register(&self, credentials: &Credentials) -> ApiResult<User>;

    /// `GET /users/me`
    async fn current_user(&self, token: &AccessToken) -> ApiResult<User>;

    /// `PUT /users/me`
    async fn update_user(&self, token: &AccessToken, update: &ProfileUpdate) -> ApiResult<User>;

    /// `DELETE /users/me`
    async fn delete_user(&self, token: &AccessToken) -> ApiResult<()>;

    /// `GET /tasks/`
    async fn list_tasks(&self, token: &AccessToken) -> ApiResult<Vec<Task>>;

    /// `POST /tasks/`
    async fn create_task(&self, token: &AccessToken, task: &NewTask) -> ApiResult<Task>;

    /// `PUT /tasks/{id}`
    async fn update_task(
        &self,
        token: &AccessToken,
        id: TaskId,
        changes: &TaskChanges,
    ) -> ApiResult<Task>;

    /// `DELETE /tasks/{id}`
    async fn delete_task(&self, token: &AccessToken, id: TaskId) -> ApiResult<()>;

    /// `POST /chat/`
    async fn send_chat_message(
        &self,
        token: &AccessToken,
        request: &ChatRequest,
    ) -> ApiResult<ChatTranscript>;

    /// `GET /chat/{session_id}`
    async fn chat_history(
        &self,
        token: &AccessToken,
        session_id: &ChatSessionId,
    ) -> ApiResult<ChatTranscript>;
}

/// Human-readable message from a failed response body.
///
/// The backend reports errors as `{"detail": ...}` where `detail` is either
/// a string or a structured validation report. Structured details are shown
/// as compact JSON; bodies without `detail` are shown as-is.
pub fn error_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {}", status);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(Value::Null) | None => body.to_string(),
            Some(Value::String(_)) => format!("HTTP {}", status),
            Some(other) => other.to_string(),
        },
        _ => body.to_string(),
    }
}
