use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::forms::{TaskField, TaskForm};
use crate::app::AppState;
use crate::model::Theme;

use super::popup::{centered_rect, error_line, field_line};

/// Render the create/edit task popup.
pub fn render_task_form(frame: &mut Frame, state: &AppState) {
    let Some(form) = state.task_form.as_ref() else {
        return;
    };

    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let error = state.tasks.error().map(ToString::to_string);
    let lines = build_task_form_lines(form, error.as_deref(), state.tasks.is_mutating());

    let title = if form.is_edit() { " Edit task " } else { " New task " };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::ACTIVE_BORDER))
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(Theme::BACKGROUND).fg(Theme::TEXT));

    frame.render_widget(paragraph, area);
}

/// Pure function: form lines plus status and error.
pub fn build_task_form_lines(form: &TaskForm, error: Option<&str>, saving: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        field_line("Title", &form.title, form.focus == TaskField::Title),
        field_line("Description", &form.description, form.focus == TaskField::Description),
        field_line("Deadline", &form.deadline, form.focus == TaskField::Deadline),
    ];

    if form.is_edit() {
        let focused = form.focus == TaskField::Completed;
        let label_style = if focused {
            Style::default().fg(Theme::ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::MUTED_TEXT)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", "Completed"), label_style),
            Span::styled(
                if form.completed { "[x]" } else { "[ ]" },
                Style::default().fg(Theme::task_color(form.completed)),
            ),
        ]));
    }

    lines.push(Line::from(Span::styled(
        "  deadline format: 2026-05-01T09:30:00",
        Style::default().fg(Theme::MUTED_TEXT),
    )));
    lines.push(Line::from(""));

    if saving {
        lines.push(Line::from(Span::styled("Saving...", Style::default().fg(Theme::WARNING))));
    } else if let Some(message) = error {
        lines.push(error_line(message));
    }

    lines.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Theme::INFO)),
        Span::raw(":next  "),
        Span::styled("Enter", Style::default().fg(Theme::INFO)),
        Span::raw(":save  "),
        Span::styled("Esc", Style::default().fg(Theme::INFO)),
        Span::raw(":cancel"),
    ]));
    lines
}
