use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::AppState;
use crate::model::Theme;

/// Render header bar.
/// Shows: app title, environment, agent on screen.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let header = Paragraph::new(build_header_text(state)).style(
        Style::default()
            .fg(Theme::TEXT)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_widget(header, area);
}

/// Pure function: build header text from state.
fn build_header_text(state: &AppState) -> Line<'static> {
    let mut spans = vec![
        Span::styled("⚡ Agentic Automation", Style::default().fg(Theme::ACCENT)),
        Span::styled(
            format!("  [{}]", state.environment),
            Style::default().fg(Theme::INFO),
        ),
    ];

    match state.viewed_agent() {
        Some(agent) => {
            spans.push(Span::styled("  Chatting with: ", Style::default().fg(Theme::MUTED_TEXT)));
            spans.push(Span::styled(
                agent.to_string(),
                Style::default().fg(Theme::ACCENT_PURPLE),
            ));
        }
        None => {
            spans.push(Span::styled(
                "  No agent selected",
                Style::default().fg(Theme::MUTED_TEXT),
            ));
        }
    }

    Line::from(spans)
}
