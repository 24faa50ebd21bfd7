use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::model::Theme;

use super::format::format_elapsed;

/// Render the oldest undismissed notification in the top-right corner.
pub fn render_notification_popup(frame: &mut Frame, state: &AppState) {
    let Some(notification) = state.notifications.front() else {
        return;
    };

    let area = frame.area();
    let width = area.width.min(50);
    let height = area.height.min(7);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y + 1.min(area.height.saturating_sub(height)),
        width,
        height,
    };
    frame.render_widget(Clear, popup);

    let age = (state.now - notification.received_at).num_seconds();
    let remaining = state.notifications.len().saturating_sub(1);
    let mut footer = vec![Span::styled(
        format!("{} ago", format_elapsed(age)),
        Style::default().fg(Theme::MUTED_TEXT),
    )];
    if remaining > 0 {
        footer.push(Span::styled(
            format!("  +{} more", remaining),
            Style::default().fg(Theme::ACCENT_WARM),
        ));
    }
    footer.push(Span::styled("  any key:dismiss", Style::default().fg(Theme::INFO)));

    let lines = vec![
        Line::from(Span::styled(notification.text.clone(), Style::default().fg(Theme::TEXT))),
        Line::from(""),
        Line::from(footer),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::ACCENT_WARM))
                .title(Span::styled(
                    " Notification ",
                    Style::default().fg(Theme::ACCENT_WARM).add_modifier(Modifier::BOLD),
                )),
        )
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(Theme::SURFACE));

    frame.render_widget(paragraph, popup);
}
