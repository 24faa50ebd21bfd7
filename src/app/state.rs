use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::app::forms::{LoginForm, ProfileForm, TaskForm, TextField};
use crate::event::ListenerStatus;
use crate::model::TaskId;
use crate::session::SessionStore;
use crate::store::{ChatStore, TaskStore};

/// Error messages kept for the status bar.
const ERROR_BACKLOG: usize = 100;

/// Main application state.
/// Updated via `update(&mut state, event) -> effects`; the returned effects
/// are the only way anything leaves the process.
#[derive(Debug)]
pub struct AppState {
    pub session: SessionStore,
    pub tasks: TaskStore,
    pub chat: ChatStore,

    /// Active screen once authenticated
    pub screen: Screen,

    pub login: LoginForm,

    /// Create/edit popup (tasks screen)
    pub task_form: Option<TaskForm>,

    /// Profile popup
    pub profile_form: Option<ProfileForm>,

    /// Pending `y` confirmation for a task deletion
    pub confirm_delete: Option<TaskId>,

    /// Search line is focused; keystrokes edit the task search
    pub searching: bool,

    /// Index into the visible task list
    pub selected_task: usize,

    /// Chat input line and whether it has focus
    pub chat_input: TextField,
    pub chat_focused: bool,

    /// Lines scrolled up from the bottom of the transcript
    pub chat_scroll: usize,

    pub notifications: NotificationCenter,

    /// Failures outside any store (token file I/O)
    pub errors: VecDeque<String>,

    pub show_help: bool,

    /// Wall clock as of the last tick
    pub now: DateTime<Utc>,

    pub should_quit: bool,
}

/// Screens reachable once authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Tasks,
    Chat,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Tasks => "1:Tasks",
            Screen::Chat => "2:Chat",
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionStore::new(),
            tasks: TaskStore::new(),
            chat: ChatStore::new(),
            screen: Screen::default(),
            login: LoginForm::default(),
            task_form: None,
            profile_form: None,
            confirm_delete: None,
            searching: false,
            selected_task: 0,
            chat_input: TextField::new(),
            chat_focused: false,
            chat_scroll: 0,
            notifications: NotificationCenter::default(),
            errors: VecDeque::with_capacity(ERROR_BACKLOG),
            show_help: false,
            now: Utc::now(),
            should_quit: false,
        }
    }

    pub fn with_screen(screen: Screen) -> Self {
        Self {
            screen,
            ..Self::new()
        }
    }

    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notifications = NotificationCenter::with_capacity(capacity);
        self
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        if self.errors.len() >= ERROR_BACKLOG {
            self.errors.pop_front();
        }
        self.errors.push_back(message.into());
    }

    /// Keep the task selection inside the visible list.
    pub fn clamp_selection(&mut self) {
        let len = self.tasks.visible().len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.tasks.visible().get(self.selected_task).map(|t| t.id)
    }

    /// Upper bound for `chat_scroll`: the transcript's unwrapped line count,
    /// matching the header, body and spacer lines drawn per message.
    pub fn max_chat_scroll(&self) -> usize {
        self.chat
            .messages()
            .iter()
            .map(|m| m.content.lines().count() + 2)
            .sum()
    }

    /// Move the transcript view; positive `delta` scrolls up.
    pub fn scroll_chat(&mut self, delta: isize) {
        let target = if delta >= 0 {
            self.chat_scroll.saturating_add(delta.unsigned_abs())
        } else {
            self.chat_scroll.saturating_sub(delta.unsigned_abs())
        };
        self.chat_scroll = target.min(self.max_chat_scroll());
    }

    /// Drop all view state tied to the session.
    pub fn reset_view(&mut self) {
        self.task_form = None;
        self.profile_form = None;
        self.confirm_delete = None;
        self.searching = false;
        self.selected_task = 0;
        self.chat_input.clear();
        self.chat_focused = false;
        self.chat_scroll = 0;
        self.notifications.clear();
    }
}

/// Undismissed notifications, oldest first.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    queue: VecDeque<Notification>,
    capacity: usize,
    pub status: ListenerStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

impl NotificationCenter {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            status: ListenerStatus::Disconnected,
        }
    }

    /// Evicts the oldest entry when full.
    pub fn push(&mut self, text: String, received_at: DateTime<Utc>) {
        if self.queue.len() >= self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(Notification { text, received_at });
    }

    pub fn front(&self) -> Option<&Notification> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.status = ListenerStatus::Disconnected;
    }
}
