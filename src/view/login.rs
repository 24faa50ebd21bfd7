use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::forms::{LoginField, LoginForm};
use crate::app::AppState;
use crate::model::Theme;

use super::components::popup::{centered_rect, error_line, field_line};

/// Login / registration screen, shown whenever there is no session.
pub fn render_login(frame: &mut Frame, state: &AppState) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let error = state.session.error().map(ToString::to_string);
    let lines = build_login_lines(&state.login, error.as_deref(), state.session.is_validating());

    let title = if state.login.register { " taskdesk · register " } else { " taskdesk · login " };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::ACTIVE_BORDER))
                .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(Theme::BACKGROUND).fg(Theme::TEXT));

    frame.render_widget(paragraph, area);
}

pub fn build_login_lines(form: &LoginForm, error: Option<&str>, validating: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        field_line("Username", &form.username, form.focus == LoginField::Username),
        field_line("Password", &form.password, form.focus == LoginField::Password),
    ];
    if form.register {
        lines.push(field_line(
            "Confirm",
            &form.confirmation,
            form.focus == LoginField::Confirmation,
        ));
    }
    lines.push(Line::from(""));

    if validating {
        lines.push(Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Theme::WARNING),
        )));
    } else if let Some(message) = error {
        lines.push(error_line(message));
    }
    lines.push(Line::from(""));

    let mode = if form.register { ":have an account? log in  " } else { ":create an account  " };
    lines.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Theme::INFO)),
        Span::raw(":next  "),
        Span::styled("Enter", Style::default().fg(Theme::INFO)),
        Span::raw(":submit  "),
        Span::styled("Ctrl+R", Style::default().fg(Theme::INFO)),
        Span::raw(mode),
        Span::styled("Ctrl+C", Style::default().fg(Theme::INFO)),
        Span::raw(":quit"),
    ]));
    lines
}
