use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::model::theme::Theme;

/// Render the task search bar overlay.
/// Displayed at the bottom of the screen while search is focused.
pub fn render_filter_bar(frame: &mut Frame, state: &AppState) {
    if !state.searching {
        return;
    }
    let area = frame.area();

    // Bottom of the screen, 3 lines including border
    let filter_area = Rect {
        x: area.x,
        y: area.height.saturating_sub(3),
        width: area.width,
        height: 3.min(area.height),
    };

    let text = Line::from(vec![
        Span::styled("/ ", Style::default().fg(Theme::INFO)),
        Span::styled(state.tasks.search().to_string(), Style::default().fg(Theme::TEXT)),
        Span::styled("█", Style::default().fg(Theme::ACTIVE_BORDER)),
    ]);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::ACTIVE_BORDER))
                .title(format!(" search · {} ", state.tasks.filter().label())),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, filter_area);
}
