use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::AppState;
use crate::model::Theme;

/// Render the agent picker sidebar.
/// Highlighted row follows `selected_agent`; agents with a bookmarked
/// session are marked so the user knows the conversation will resume.
pub fn render_agent_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let bookmark = state.session.context().map(|ctx| &ctx.bookmark);

    let items: Vec<ListItem> = state
        .agents
        .iter()
        .map(|agent| {
            let resumable = bookmark.is_some_and(|b| b.get(agent).is_some());
            let marker = if resumable { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Theme::SUCCESS)),
                Span::styled(agent.to_string(), Style::default().fg(Theme::TEXT)),
            ]))
        })
        .collect();

    let title = match state.session.context() {
        Some(ctx) => format!(" {} ", ctx.user.email),
        None => " Agents ".to_string(),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::PANEL_BORDER))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(Theme::SELECTION_BG)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    if !state.agents.is_empty() {
        list_state.select(Some(state.selected_agent));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}
