use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::forms::TextField;
use crate::model::Theme;

/// Render a yes/no confirmation on top of the current view.
pub fn render_confirm(frame: &mut Frame, title: &str, question: &str) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(question.to_string(), Style::default().fg(Theme::TEXT))),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Theme::ERROR).add_modifier(Modifier::BOLD)),
            Span::raw(":confirm  "),
            Span::styled("any key", Style::default().fg(Theme::INFO)),
            Span::raw(":cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::WARNING))
                .title(format!(" {} ", title)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(Theme::BACKGROUND));

    frame.render_widget(paragraph, area);
}

/// One labelled input line; the focused one gets a cursor.
pub fn field_line(label: &str, field: &TextField, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Theme::ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::MUTED_TEXT)
    };

    let mut spans = vec![
        Span::styled(format!("{:<14}", label), label_style),
        Span::styled(field.display(), Style::default().fg(Theme::TEXT)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Theme::ACTIVE_BORDER)));
    }
    Line::from(spans)
}

pub fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(message.to_string(), Style::default().fg(Theme::ERROR)))
}

/// Helper to create a centered rect using up certain percentage of the available rect `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::components::buffer_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 40, parent);
        assert!(rect.width <= 60);
        assert!(rect.height <= 20);
        assert!(rect.x > 0);
        assert!(rect.y > 0);
        assert!(rect.right() <= parent.right());
        assert!(rect.bottom() <= parent.bottom());
    }

    #[test]
    fn confirm_shows_question() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| render_confirm(frame, "Delete", "Delete task?"))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Delete task?"));
        assert!(text.contains(":confirm"));
    }

    #[test]
    fn focused_field_has_cursor() {
        let field = TextField::with_value("abc");
        let line = field_line("Title", &field, true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("abc█"));

        let line = field_line("Title", &field, false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(!text.contains('█'));
    }
}
