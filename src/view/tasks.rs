use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::AppState;
use crate::model::{StatusFilter, Theme};

use super::components::render_task_list;

/// Tasks screen: filter strip over the task list.
pub fn render_tasks(frame: &mut Frame, state: &AppState, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter strip
            Constraint::Min(3),    // Task list
        ])
        .split(area);

    frame.render_widget(Paragraph::new(build_filter_strip(state)), layout[0]);
    render_task_list(frame, layout[1], state);
}

/// Pure function: status filter tabs plus the active search.
fn build_filter_strip(state: &AppState) -> Line<'static> {
    let stats = state.tasks.stats();
    let current = state.tasks.filter();

    let mut spans = Vec::new();
    for (filter, count) in [
        (StatusFilter::All, stats.total),
        (StatusFilter::Pending, stats.pending),
        (StatusFilter::Completed, stats.completed),
    ] {
        let style = if filter == current {
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT)
        } else {
            Style::default().fg(Theme::MUTED_TEXT)
        };
        spans.push(Span::styled(format!(" {} ({}) ", filter.label(), count), style));
        spans.push(Span::raw(" "));
    }

    let search = state.tasks.search();
    if !search.is_empty() {
        spans.push(Span::styled("  / ", Style::default().fg(Theme::INFO)));
        spans.push(Span::styled(search.to_string(), Style::default().fg(Theme::TEXT)));
    }

    Line::from(spans)
}
