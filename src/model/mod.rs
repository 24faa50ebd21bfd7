pub mod chat;
pub mod ids;
pub mod serde_utils;
pub mod task;
pub mod theme;
pub mod user;
pub mod validation;

pub use chat::{ChatMessage, ChatRequest, ChatTranscript, SenderType};
pub use ids::{ChatSessionId, MessageId, TaskId, UserId};
pub use task::{NewTask, StatusFilter, Task, TaskChanges, TaskStats};
pub use theme::Theme;
pub use user::{AccessToken, Credentials, ProfileUpdate, TokenResponse, User};
