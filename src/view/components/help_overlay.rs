use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::Theme;

use super::popup::centered_rect;

/// Render the help overlay.
/// Displayed as centered popup when show_help is true.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text())
        .block(
            Block::default()
                .title(" Help - press any key to close ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::ACTIVE_BORDER)),
        )
        .alignment(Alignment::Left)
        .style(Style::default().bg(Theme::BACKGROUND).fg(Theme::TEXT));

    frame.render_widget(paragraph, popup_area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Theme::INFO).add_modifier(Modifier::BOLD),
    ))
}

/// Build help text with keybindings grouped by category.
fn build_help_text() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        section("AGENTS"),
        Line::from("  ↑ / ↓       - Switch agent (resumes its last session)"),
        Line::from(""),
        section("CHAT"),
        Line::from("  Enter       - Send message"),
        Line::from("  Esc         - Clear input"),
        Line::from("  PgUp / PgDn - Scroll conversation"),
        Line::from("  End         - Jump to latest"),
        Line::from(""),
        section("SESSION"),
        Line::from("  Ctrl+L      - Log out (or type /logout)"),
        Line::from("  Ctrl+C      - Quit"),
        Line::from("  F1 / ?      - Toggle this help"),
    ]
}
