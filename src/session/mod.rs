//! Authentication lifecycle.
//!
//! `SessionStore` owns the token and the user it resolved to. Like the
//! resource stores it never performs I/O: operations return the `Effect`s to
//! run and the matching `apply_*` method folds the backend outcome back in.

use crate::effects::Effect;
use crate::error::{ApiError, SessionError, ValidationError};
use crate::model::{validation, AccessToken, Credentials, User, UserId};
use crate::store::{Completion, Pending, RequestSeq, Sequencer};

/// What started a validation round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOrigin {
    /// Token loaded from disk at startup.
    Restore,
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Validating {
        request: RequestSeq,
        origin: AuthOrigin,
    },
    Authenticated {
        token: AccessToken,
        user: User,
    },
    /// Explicit login or registration failed. Holds no token.
    Error { error: SessionError },
}

#[derive(Debug)]
pub struct SessionStore {
    state: SessionState,
    profile: Pending,
    deletion: Pending,
    profile_error: Option<SessionError>,
    seq: Sequencer,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: SessionState::Anonymous,
            profile: Pending::default(),
            deletion: Pending::default(),
            profile_error: None,
            seq: Sequencer::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<&AccessToken> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// True when `user_id` is the identity currently signed in.
    pub fn is_current_user(&self, user_id: UserId) -> bool {
        self.user().is_some_and(|user| user.id == user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Validating { .. })
            || self.profile.is_pending()
            || self.deletion.is_pending()
    }

    pub fn is_validating(&self) -> bool {
        matches!(self.state, SessionState::Validating { .. })
    }

    /// Error from the last login or registration attempt.
    pub fn error(&self) -> Option<&SessionError> {
        match &self.state {
            SessionState::Error { error } => Some(error),
            _ => None,
        }
    }

    /// Error from the last profile update or account deletion.
    pub fn profile_error(&self) -> Option<&SessionError> {
        self.profile_error.as_ref()
    }

    /// Validate a token found in durable storage.
    pub fn restore(&mut self, token: AccessToken) -> Vec<Effect> {
        if !self.accepts_credentials() {
            return Vec::new();
        }
        let seq = self.begin_validation(AuthOrigin::Restore);
        vec![Effect::ValidateToken { seq, token }]
    }

    pub fn login(&mut self, username: &str, password: &str) -> Vec<Effect> {
        if !self.accepts_credentials() {
            return Vec::new();
        }
        let credentials = Credentials::new(username.trim(), password);
        let seq = self.begin_validation(AuthOrigin::Login);
        tracing::info!(username = %credentials.username, "logging in");
        vec![Effect::Login { seq, credentials }]
    }

    /// Checked locally first; invalid input never reaches the backend.
    pub fn register(&mut self, username: &str, password: &str, confirmation: &str) -> Vec<Effect> {
        if !self.accepts_credentials() {
            return Vec::new();
        }
        match validation::registration(username, password, confirmation) {
            Ok(credentials) => {
                let seq = self.begin_validation(AuthOrigin::Register);
                tracing::info!(username = %credentials.username, "registering");
                vec![Effect::Register { seq, credentials }]
            }
            Err(e) => {
                self.state = SessionState::Error { error: e.into() };
                Vec::new()
            }
        }
    }

    /// Fold in the outcome of restore, login or registration.
    pub fn apply_validation(
        &mut self,
        seq: RequestSeq,
        result: Result<(AccessToken, User), ApiError>,
    ) -> (Completion, Vec<Effect>) {
        let origin = match self.state {
            SessionState::Validating { request, origin } if request == seq => origin,
            _ => {
                tracing::debug!(seq = seq.get(), "discarding stale session validation");
                return (Completion::Stale, Vec::new());
            }
        };

        match (origin, result) {
            (origin, Ok((token, user))) => {
                tracing::info!(user_id = %user.id, username = %user.username, "session authenticated");
                let effects = match origin {
                    AuthOrigin::Restore => Vec::new(),
                    AuthOrigin::Login | AuthOrigin::Register => vec![Effect::SaveToken(token.clone())],
                };
                self.state = SessionState::Authenticated { token, user };
                (Completion::Applied, effects)
            }
            (AuthOrigin::Restore, Err(e)) => {
                tracing::info!(error = %e, "stored token rejected");
                self.state = SessionState::Anonymous;
                (Completion::Failed, vec![Effect::ClearToken])
            }
            (origin, Err(e)) => {
                tracing::info!(error = %e, ?origin, "authentication failed");
                let error = if e.is_unauthorized() {
                    SessionError::InvalidCredentials
                } else if origin == AuthOrigin::Register && e.is_rejection() {
                    ValidationError::Rejected(e.to_string()).into()
                } else {
                    SessionError::Api(e)
                };
                self.state = SessionState::Error { error };
                (Completion::Failed, Vec::new())
            }
        }
    }

    /// Drop the session and everything it implies.
    pub fn logout(&mut self) -> Vec<Effect> {
        if let Some(user) = self.user() {
            tracing::info!(user_id = %user.id, "session ended");
        }
        self.state = SessionState::Anonymous;
        self.profile.cancel();
        self.deletion.cancel();
        self.profile_error = None;
        vec![Effect::ClearToken, Effect::DisconnectNotifications]
    }

    /// The backend no longer honours the token.
    pub fn handle_unauthorized(&mut self) -> Vec<Effect> {
        tracing::warn!("backend rejected token, logging out");
        self.logout()
    }

    /// Blank fields are left unchanged.
    pub fn update_profile(
        &mut self,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> Vec<Effect> {
        let (token, current) = match &self.state {
            SessionState::Authenticated { token, user } => (token.clone(), user.username.clone()),
            _ => return Vec::new(),
        };
        if self.profile.is_pending() {
            return Vec::new();
        }

        match validation::profile_update(&current, username, password, confirmation) {
            Ok(update) => {
                let seq = self.seq.next();
                self.profile.begin(seq);
                vec![Effect::UpdateProfile { seq, token, update }]
            }
            Err(e) => {
                self.profile_error = Some(e.into());
                Vec::new()
            }
        }
    }

    pub fn apply_profile_update(&mut self, seq: RequestSeq, result: Result<User, ApiError>) -> Completion {
        if !self.profile.settle(seq) {
            return Completion::Stale;
        }
        match result {
            Ok(updated) => {
                if let SessionState::Authenticated { user, .. } = &mut self.state {
                    tracing::info!(user_id = %updated.id, "profile updated");
                    *user = updated;
                }
                self.profile_error = None;
                Completion::Applied
            }
            Err(e) if e.is_unauthorized() => Completion::Unauthorized,
            Err(e) if e.is_rejection() => {
                self.profile_error = Some(ValidationError::Rejected(e.to_string()).into());
                Completion::Failed
            }
            Err(e) => {
                self.profile_error = Some(e.into());
                Completion::Failed
            }
        }
    }

    pub fn delete_account(&mut self) -> Vec<Effect> {
        let token = match self.token() {
            Some(token) => token.clone(),
            None => return Vec::new(),
        };
        if self.deletion.is_pending() {
            return Vec::new();
        }
        let seq = self.seq.next();
        self.deletion.begin(seq);
        vec![Effect::DeleteAccount { seq, token }]
    }

    /// On `Applied` the caller tears the session down as for logout.
    pub fn apply_account_deleted(&mut self, seq: RequestSeq, result: Result<(), ApiError>) -> Completion {
        if !self.deletion.settle(seq) {
            return Completion::Stale;
        }
        match result {
            Ok(()) => Completion::Applied,
            Err(e) if e.is_unauthorized() => Completion::Unauthorized,
            Err(e) => {
                self.profile_error = Some(e.into());
                Completion::Failed
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.state, SessionState::Error { .. }) {
            self.state = SessionState::Anonymous;
        }
        self.profile_error = None;
    }

    /// Login and registration are accepted from `Anonymous` and `Error` only.
    fn accepts_credentials(&self) -> bool {
        matches!(self.state, SessionState::Anonymous | SessionState::Error { .. })
    }

    fn begin_validation(&mut self, origin: AuthOrigin) -> RequestSeq {
        let request = self.seq.next();
        self.state = SessionState::Validating { request, origin };
        request
    }
}
