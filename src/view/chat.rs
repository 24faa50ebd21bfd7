use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::AppState;

use super::components::{render_chat_input, render_message_list};

/// Chat screen: transcript over a three-line input box.
pub fn render_chat(frame: &mut Frame, state: &AppState, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    render_message_list(frame, layout[0], state);
    render_chat_input(frame, layout[1], state);
}
