use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{error_message, ApiResult, Backend};
use crate::error::ApiError;
use crate::model::{
    AccessToken, ChatRequest, ChatSessionId, ChatTranscript, Credentials, NewTask, ProfileUpdate,
    Task, TaskChanges, TaskId, TokenResponse, User,
};

/// `Backend` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every request goes through here: base URL, JSON accept header and,
    /// when given, the bearer token.
    fn request(&self, method: Method, path: &str, token: Option<&AccessToken>) -> RequestBuilder {
        tracing::debug!(%method, path, authenticated = token.is_some(), "backend request");
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::ACCEPT, "application/json");
        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "backend unreachable");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), %message, "backend rejected request");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// For endpoints whose success body is irrelevant (may be empty or 204).
    async fn empty(&self, request: RequestBuilder) -> ApiResult<()> {
        self.send(request).await.map(|_| ())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        self.json(self.request(Method::POST, "/auth/login", None).json(credentials))
            .await
    }

    async fn register(&self, credentials: &Credentials) -> ApiResult<User> {
        self.json(self.request(Method::POST, "/users/", None).json(credentials))
            .await
    }

    async fn current_user(&self, token: &AccessToken) -> ApiResult<User> {
        self.json(self.request(Method::GET, "/users/me", Some(token)))
            .await
    }

    async fn update_user(&self, token: &AccessToken, update: &ProfileUpdate) -> ApiResult<User> {
        self.json(self.request(Method::PUT, "/users/me", Some(token)).json(update))
            .await
    }

    async fn delete_user(&self, token: &AccessToken) -> ApiResult<()> {
        self.empty(self.request(Method::DELETE, "/users/me", Some(token)))
            .await
    }

    async fn list_tasks(&self, token: &AccessToken) -> ApiResult<Vec<Task>> {
        self.json(self.request(Method::GET, "/tasks/", Some(token)))
            .await
    }

    async fn create_task(&self, token: &AccessToken, task: &NewTask) -> ApiResult<Task> {
        self.json(self.request(Method::POST, "/tasks/", Some(token)).json(task))
            .await
    }

    async fn update_task(
        &self,
        token: &AccessToken,
        id: TaskId,
        changes: &TaskChanges,
    ) -> ApiResult<Task> {
        let path = format!("/tasks/{}", id);
        self.json(self.request(Method::PUT, &path, Some(token)).json(changes))
            .await
    }

    async fn delete_task(&self, token: &AccessToken, id: TaskId) -> ApiResult<()> {
        let path = format!("/tasks/{}", id);
        self.empty(self.request(Method::DELETE, &path, Some(token)))
            .await
    }

    async fn send_chat_message(
        &self,
        token: &AccessToken,
        request: &ChatRequest,
    ) -> ApiResult<ChatTranscript> {
        self.json(self.request(Method::POST, "/chat/", Some(token)).json(request))
            .await
    }

    async fn chat_history(
        &self,
        token: &AccessToken,
        session_id: &ChatSessionId,
    ) -> ApiResult<ChatTranscript> {
        let path = format!("/chat/{}", session_id);
        self.json(self.request(Method::GET, &path, Some(token)))
            .await
    }
}
