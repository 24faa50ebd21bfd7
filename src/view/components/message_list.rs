use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::model::{ChatMessage, SenderType, Theme};

use super::format::format_timestamp;

/// Render the chat transcript, pinned to the bottom unless scrolled.
pub fn render_message_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = build_message_lines(state.chat.messages(), state.now);
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Say hello. Press i to start typing.",
            Style::default().fg(Theme::MUTED_TEXT),
        )));
    }
    if state.chat.is_typing() {
        lines.push(Line::from(Span::styled(
            "  agent is typing...",
            Style::default().fg(Theme::SENDER_AGENT).add_modifier(Modifier::ITALIC),
        )));
    }

    // Scroll measured from the bottom; long lines may wrap so this is approximate
    let inner_height = area.height.saturating_sub(2) as usize;
    let overflow = lines.len().saturating_sub(inner_height);
    let offset = overflow.saturating_sub(state.chat_scroll);

    let title = if state.chat.is_loading_history() {
        " Chat · loading history "
    } else {
        " Chat "
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::PANEL_BORDER))
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((offset.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(paragraph, area);
}

/// Pure function: a label line per message followed by its content lines.
pub fn build_message_lines(messages: &[ChatMessage], now: DateTime<Utc>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in messages {
        let label = match message.sender_type {
            SenderType::User => "you",
            SenderType::Agent => "agent",
        };
        let mut header = vec![
            Span::styled(
                label,
                Style::default()
                    .fg(Theme::sender_color(message.sender_type))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", format_timestamp(message.timestamp, now)),
                Style::default().fg(Theme::MUTED_TEXT),
            ),
        ];
        if message.is_optimistic() {
            header.push(Span::styled("  sending", Style::default().fg(Theme::WARNING)));
        }
        lines.push(Line::from(header));

        for text in message.content.lines() {
            lines.push(Line::from(Span::styled(
                format!("  {}", text),
                Style::default().fg(Theme::TEXT),
            )));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Render the input line below the transcript.
pub fn render_chat_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.chat_focused;
    let mut spans = vec![Span::styled("> ", Style::default().fg(Theme::INFO))];
    if state.chat_input.is_empty() && !focused {
        spans.push(Span::styled("press i to type", Style::default().fg(Theme::MUTED_TEXT)));
    } else {
        spans.push(Span::styled(state.chat_input.display(), Style::default().fg(Theme::TEXT)));
    }
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Theme::ACTIVE_BORDER)));
    }

    let border = if focused { Theme::ACTIVE_BORDER } else { Theme::PANEL_BORDER };
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MessageId;
    use chrono::TimeZone;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn labels_senders_and_marks_optimistic() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        let messages = vec![
            ChatMessage::new(MessageId::local(1), "hi there", SenderType::User, now),
            ChatMessage::new(MessageId::server("7"), "hello!\nhow can I help?", SenderType::Agent, now),
        ];
        let rendered = text(&build_message_lines(&messages, now));
        assert!(rendered.contains("you  12:30  sending"));
        assert!(rendered.contains("agent  12:30"));
        assert!(rendered.contains("  how can I help?"));
    }

    #[test]
    fn empty_transcript_has_no_lines() {
        assert!(build_message_lines(&[], Utc::now()).is_empty());
    }
}
