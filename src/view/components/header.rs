use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, Screen};
use crate::event::ListenerStatus;
use crate::model::Theme;

use super::format::listener_label;

/// Render header bar.
/// Shows: app name, screen indicator, user, task counts, notification link.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let header_text = build_header_text(state);

    let header = Paragraph::new(header_text).style(
        Style::default()
            .fg(Theme::TEXT)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_widget(header, area);
}

/// Pure function: build header text from state.
fn build_header_text(state: &AppState) -> Line<'static> {
    let mut spans = vec![
        Span::styled("taskdesk", Style::default().fg(Theme::ACCENT)),
        Span::raw(" "),
        Span::styled(format!("[{}]", state.screen.label()), Style::default().fg(Theme::INFO)),
    ];

    if let Some(user) = state.session.user() {
        spans.push(Span::styled("  @", Style::default().fg(Theme::MUTED_TEXT)));
        spans.push(Span::styled(user.username.clone(), Style::default().fg(Theme::ACCENT_PURPLE)));
    }

    match state.screen {
        Screen::Tasks => {
            let stats = state.tasks.stats();
            spans.push(Span::styled(
                format!("  {}/{} done", stats.completed, stats.total),
                Style::default().fg(Theme::SUCCESS),
            ));
            if stats.pending > 0 {
                spans.push(Span::styled(
                    format!("  {} pending", stats.pending),
                    Style::default().fg(Theme::ACCENT_WARM),
                ));
            }
        }
        Screen::Chat => {
            let label = match state.chat.session_id() {
                Some(id) => format!("  session {}", id),
                None => "  new conversation".to_string(),
            };
            spans.push(Span::styled(label, Style::default().fg(Theme::MUTED_TEXT)));
        }
    }

    if state.session.is_loading() || state.tasks.is_loading() || state.chat.is_loading_history() {
        spans.push(Span::styled("  ⟳", Style::default().fg(Theme::WARNING)));
    }

    let status = &state.notifications.status;
    let color = match status {
        ListenerStatus::Connected => Theme::SUCCESS,
        ListenerStatus::Connecting => Theme::WARNING,
        ListenerStatus::Reconnecting { .. } => Theme::ACCENT_WARM,
        ListenerStatus::Disconnected => Theme::MUTED_TEXT,
    };
    spans.push(Span::styled("  ● ", Style::default().fg(color)));
    spans.push(Span::styled(listener_label(status), Style::default().fg(Theme::MUTED_TEXT)));

    Line::from(spans)
}
