use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::theme::Theme;

use super::popup::centered_rect;

/// Render the help overlay.
/// Displayed as centered popup when show_help is true.
/// Lists all keybindings grouped by category.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 80, frame.area());

    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text())
        .block(
            Block::default()
                .title(" Help - press any key to close ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::ACTIVE_BORDER)),
        )
        .alignment(Alignment::Left)
        .style(Style::default().bg(Theme::BACKGROUND).fg(Theme::TEXT));

    frame.render_widget(paragraph, popup_area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Theme::INFO).add_modifier(Modifier::BOLD),
    ))
}

/// Build help text with keybindings grouped by category.
fn build_help_text() -> Vec<Line<'static>> {
    vec![
        section("GLOBAL"),
        Line::from("  1 / 2       - Tasks / Chat screen"),
        Line::from("  p           - Profile"),
        Line::from("  L           - Log out"),
        Line::from("  x           - Dismiss error"),
        Line::from("  ?           - Toggle help overlay"),
        Line::from("  q / Ctrl+C  - Quit application"),
        Line::from(""),
        section("TASKS"),
        Line::from("  j / k       - Move selection"),
        Line::from("  n           - New task"),
        Line::from("  e / Enter   - Edit task"),
        Line::from("  Space       - Toggle completed"),
        Line::from("  d           - Delete task (y to confirm)"),
        Line::from("  f           - Cycle status filter"),
        Line::from("  /           - Search title and description"),
        Line::from("  r           - Refresh from server"),
        Line::from(""),
        section("CHAT"),
        Line::from("  i / Enter   - Start typing, Enter sends"),
        Line::from("  Esc         - Stop typing"),
        Line::from("  j / k       - Scroll transcript"),
        Line::from("  Ctrl+N      - New conversation"),
        Line::from("  Ctrl+R      - Reload history"),
        Line::from(""),
        section("FORMS"),
        Line::from("  Tab         - Next field"),
        Line::from("  Enter       - Submit"),
        Line::from("  Esc         - Cancel"),
        Line::from("  Ctrl+R      - Login / register (login screen)"),
        Line::from("  Ctrl+D      - Delete account (profile)"),
    ]
}
