use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;

use crate::error::ApiError;
use crate::model::{AccessToken, ChatTranscript, Task, TaskId, User, UserId};
use crate::store::RequestSeq;

/// All events that can occur in the application.
/// Sourced from keyboard input, timers, finished backend calls and the
/// notification socket.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input event
    Key(KeyEvent),

    /// Timer tick (elapsed time, spinners)
    Tick(DateTime<Utc>),

    /// A persisted token was found at startup
    TokenRestored(AccessToken),

    /// Login, registration or startup validation finished
    SessionValidated {
        seq: RequestSeq,
        result: Result<(AccessToken, User), ApiError>,
    },

    ProfileUpdated {
        seq: RequestSeq,
        result: Result<User, ApiError>,
    },

    AccountDeleted {
        seq: RequestSeq,
        result: Result<(), ApiError>,
    },

    TasksLoaded {
        seq: RequestSeq,
        result: Result<Vec<Task>, ApiError>,
    },

    TaskCreated {
        seq: RequestSeq,
        result: Result<Task, ApiError>,
    },

    TaskUpdated {
        seq: RequestSeq,
        result: Result<Task, ApiError>,
    },

    TaskDeleted {
        seq: RequestSeq,
        id: TaskId,
        result: Result<(), ApiError>,
    },

    ChatReplied {
        seq: RequestSeq,
        result: Result<ChatTranscript, ApiError>,
    },

    ChatHistoryLoaded {
        seq: RequestSeq,
        result: Result<ChatTranscript, ApiError>,
    },

    /// Text frame from the notification socket of `user_id`, shown verbatim
    NotificationReceived { user_id: UserId, text: String },

    /// Notification socket state change for `user_id`
    ListenerChanged {
        user_id: UserId,
        status: ListenerStatus,
    },

    /// Non-fatal failure outside any store (token file I/O)
    Error { source: String, error: String },
}

/// Connection state of the notification socket.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListenerStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32, delay: Duration },
}
