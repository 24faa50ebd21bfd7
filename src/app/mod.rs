pub mod forms;
pub mod navigation;
pub mod state;
pub mod update;

pub use forms::{LoginField, LoginForm, ProfileField, ProfileForm, TaskField, TaskForm, TextField};
pub use navigation::handle_key;
pub use state::{AppState, Notification, NotificationCenter, Screen};
pub use update::{logout, update};
