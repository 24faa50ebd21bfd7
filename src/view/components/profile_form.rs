use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::forms::{ProfileField, ProfileForm};
use crate::app::AppState;
use crate::model::Theme;

use super::popup::{centered_rect, error_line, field_line};

/// Render the profile popup: username/password change and account deletion.
pub fn render_profile_form(frame: &mut Frame, state: &AppState) {
    let Some(form) = state.profile_form.as_ref() else {
        return;
    };

    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let username = state.session.user().map(|u| u.username.clone()).unwrap_or_default();
    let error = state.session.profile_error().map(ToString::to_string);
    let lines = build_profile_lines(form, &username, error.as_deref(), state.session.is_loading());

    let border = if form.confirm_delete { Theme::ERROR } else { Theme::ACTIVE_BORDER };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Profile "),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(Theme::BACKGROUND).fg(Theme::TEXT));

    frame.render_widget(paragraph, area);
}

pub fn build_profile_lines(
    form: &ProfileForm,
    username: &str,
    error: Option<&str>,
    busy: bool,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Signed in as ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                username.to_string(),
                Style::default().fg(Theme::ACCENT_PURPLE).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        field_line("New username", &form.username, form.focus == ProfileField::Username),
        field_line("New password", &form.password, form.focus == ProfileField::Password),
        field_line("Confirm", &form.confirmation, form.focus == ProfileField::Confirmation),
        Line::from(Span::styled(
            "  leave a field blank to keep it",
            Style::default().fg(Theme::MUTED_TEXT),
        )),
        Line::from(""),
    ];

    if form.confirm_delete {
        lines.push(Line::from(vec![
            Span::styled(
                "Delete this account permanently? ",
                Style::default().fg(Theme::ERROR).add_modifier(Modifier::BOLD),
            ),
            Span::styled("y", Style::default().fg(Theme::ERROR)),
            Span::raw(":yes  any key:no"),
        ]));
        return lines;
    }

    if busy {
        lines.push(Line::from(Span::styled("Saving...", Style::default().fg(Theme::WARNING))));
    } else if let Some(message) = error {
        lines.push(error_line(message));
    }

    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Theme::INFO)),
        Span::raw(":save  "),
        Span::styled("Ctrl+D", Style::default().fg(Theme::INFO)),
        Span::raw(":delete account  "),
        Span::styled("Esc", Style::default().fg(Theme::INFO)),
        Span::raw(":close"),
    ]));
    lines
}
