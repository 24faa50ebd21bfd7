use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::AppState;
use crate::model::{Task, Theme};

use super::format::{format_deadline, is_overdue, truncate};

/// Render the task list panel with status marks and deadlines.
pub fn render_task_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = state.tasks.visible();
    let items = if visible.is_empty() {
        vec![ListItem::new(empty_message(state))]
    } else {
        build_task_list_items(&visible, state.selected_task, state.now)
    };

    let title = format!(
        " Tasks · {} · {} shown ",
        state.tasks.filter().label(),
        visible.len()
    );

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::ACTIVE_BORDER))
                .title(title),
        )
        .style(Style::default().fg(Theme::TEXT));

    // ListState keeps the selected row scrolled into view
    let mut list_state = ListState::default();
    if !visible.is_empty() {
        list_state.select(Some(state.selected_task));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn empty_message(state: &AppState) -> Line<'static> {
    let text = if state.tasks.is_refreshing() {
        "  Loading tasks..."
    } else if state.tasks.tasks().is_empty() {
        "  No tasks yet. Press n to create one."
    } else {
        "  No tasks match the current filter."
    };
    Line::from(Span::styled(text, Style::default().fg(Theme::MUTED_TEXT)))
}

/// Pure function: one row per task, the selected row highlighted.
pub fn build_task_list_items(
    tasks: &[&Task],
    selected: usize,
    now: DateTime<Utc>,
) -> Vec<ListItem<'static>> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let bg = if i == selected { Theme::SELECTION_BG } else { Theme::BACKGROUND };
            let (mark, mark_color) = if task.completed {
                ("✓", Theme::task_color(true))
            } else {
                ("○", Theme::task_color(false))
            };

            let title_style = if task.completed {
                Style::default().fg(Theme::MUTED_TEXT).bg(bg).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Theme::TEXT).bg(bg)
            };

            let mut spans = vec![
                Span::styled(format!(" {} ", mark), Style::default().fg(mark_color).bg(bg)),
                Span::styled(truncate(&task.title, 48), title_style),
            ];

            if !task.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", truncate(&task.description, 40)),
                    Style::default().fg(Theme::MUTED_TEXT).bg(bg),
                ));
            }

            if let Some(deadline) = &task.deadline {
                let color = if !task.completed && is_overdue(deadline, now) {
                    Theme::ERROR
                } else {
                    Theme::ACCENT_WARM
                };
                spans.push(Span::styled(
                    format!("  due {}", format_deadline(deadline)),
                    Style::default().fg(color).bg(bg),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect()
}
