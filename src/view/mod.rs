use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{AppState, Screen};

pub mod chat;
pub mod components;
pub mod login;
pub mod tasks;

pub use chat::render_chat;
pub use login::render_login;
pub use tasks::render_tasks;

/// Main view dispatcher.
/// Login when there is no session, otherwise header / screen / footer with
/// popups layered on top in the order the key handler consults them.
pub fn render(state: &AppState, frame: &mut Frame) {
    if !state.session.is_authenticated() {
        login::render_login(frame, state);
        if state.show_help {
            components::render_help_overlay(frame);
        }
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Screen
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    components::render_header(frame, layout[0], state);
    match state.screen {
        Screen::Tasks => tasks::render_tasks(frame, state, layout[1]),
        Screen::Chat => chat::render_chat(frame, state, layout[1]),
    }
    components::render_footer(frame, layout[2], state);

    components::render_filter_bar(frame, state);
    components::render_task_form(frame, state);
    components::render_profile_form(frame, state);

    if let Some(title) = state
        .confirm_delete
        .and_then(|id| state.tasks.get(id))
        .map(|t| t.title.clone())
    {
        components::render_confirm(frame, "Delete task", &format!("Delete \"{}\"?", title));
    }

    if state.show_help {
        components::render_help_overlay(frame);
    }

    components::render_notification_popup(frame, state);
}
