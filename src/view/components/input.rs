use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::model::Theme;

/// Render the chat input line with a per-agent placeholder.
pub fn render_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if state.input.is_empty() {
        Line::from(Span::styled(
            placeholder(state),
            Style::default()
                .fg(Theme::MUTED_TEXT)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(vec![
            Span::styled(state.input.clone(), Style::default().fg(Theme::TEXT)),
            Span::styled("▏", Style::default().fg(Theme::ACCENT)),
        ])
    };

    let border = if state.is_busy() {
        Theme::ACCENT_WARM
    } else {
        Theme::ACTIVE_BORDER
    };

    let input = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(input, area);
}

pub fn placeholder(state: &AppState) -> String {
    match state.highlighted_agent() {
        Some(agent) => format!("Ask {agent} a question..."),
        None => "No agents configured".to_string(),
    }
}
