use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, Screen};
use crate::model::Theme;

/// Render footer status bar.
/// The current error, if any, replaces the key hints.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer_text = match current_error(state) {
        Some(message) => build_error_text(&message),
        None => build_footer_text(state),
    };

    let footer = Paragraph::new(footer_text).style(
        Style::default()
            .fg(Theme::TEXT)
            .bg(Theme::FOOTER_BG)
            .add_modifier(Modifier::DIM),
    );

    frame.render_widget(footer, area);
}

/// Error for the active screen, falling back to process-level errors.
pub fn current_error(state: &AppState) -> Option<String> {
    let store_error = match state.screen {
        Screen::Tasks => state.tasks.error().map(ToString::to_string),
        Screen::Chat => state.chat.error().map(ToString::to_string),
    };
    store_error.or_else(|| state.errors.back().cloned())
}

fn build_error_text(message: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("✗ ", Style::default().fg(Theme::ERROR)),
        Span::styled(message.to_string(), Style::default().fg(Theme::ERROR)),
        Span::raw("  "),
        Span::styled("x", Style::default().fg(Theme::INFO)),
        Span::raw(":dismiss"),
    ])
}

fn hint(spans: &mut Vec<Span<'static>>, key: &'static str, label: &'static str) {
    spans.push(Span::styled(key, Style::default().fg(Theme::INFO)));
    spans.push(Span::raw(label));
}

/// Pure function: build footer text based on current screen and focus.
fn build_footer_text(state: &AppState) -> Line<'static> {
    let mut spans = Vec::new();

    if state.searching {
        hint(&mut spans, "Enter", ":keep ");
        hint(&mut spans, "Esc", ":clear search");
        return Line::from(spans);
    }

    if state.screen == Screen::Chat && state.chat_focused {
        hint(&mut spans, "Enter", ":send ");
        hint(&mut spans, "Esc", ":stop typing");
        return Line::from(spans);
    }

    if state.task_form.is_some() || state.profile_form.is_some() {
        hint(&mut spans, "Tab", ":next field ");
        hint(&mut spans, "Enter", ":save ");
        hint(&mut spans, "Esc", ":cancel");
        return Line::from(spans);
    }

    hint(&mut spans, "q", ":quit ");
    hint(&mut spans, "1/2", ":screens ");

    match state.screen {
        Screen::Tasks => {
            hint(&mut spans, "j/k", ":select ");
            hint(&mut spans, "n", ":new ");
            hint(&mut spans, "e", ":edit ");
            hint(&mut spans, "Space", ":done ");
            hint(&mut spans, "d", ":delete ");
            hint(&mut spans, "f", ":filter ");
            hint(&mut spans, "/", ":search ");
            hint(&mut spans, "r", ":refresh ");
        }
        Screen::Chat => {
            hint(&mut spans, "i", ":type ");
            hint(&mut spans, "j/k", ":scroll ");
            hint(&mut spans, "^N", ":new chat ");
            hint(&mut spans, "^R", ":reload ");
        }
    }

    hint(&mut spans, "p", ":profile ");
    hint(&mut spans, "L", ":logout ");
    hint(&mut spans, "?", ":help");

    Line::from(spans)
}
