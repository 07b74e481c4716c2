use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use chrono::Utc;

use crate::app::{AppState, NoticeLevel, Screen};
use crate::model::Theme;

/// Render footer status bar.
/// Latest notice wins; otherwise keybinding hints for the current screen.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer = Paragraph::new(build_footer_text(state)).style(
        Style::default()
            .fg(Theme::TEXT)
            .bg(Theme::FOOTER_BG)
            .add_modifier(Modifier::DIM),
    );

    frame.render_widget(footer, area);
}

/// How long a notice replaces the keybinding hints
const NOTICE_TTL_SECS: i64 = 15;

/// Build footer text based on current screen and state.
fn build_footer_text(state: &AppState) -> Line<'static> {
    if state.screen() == Screen::Chat {
        let recent = state
            .latest_notice()
            .filter(|n| (Utc::now() - n.at).num_seconds() < NOTICE_TTL_SECS);
        if let Some(notice) = recent {
            let color = match notice.level {
                NoticeLevel::Warning => Theme::WARNING,
                NoticeLevel::Error => Theme::ERROR,
            };
            return Line::from(vec![
                Span::styled(
                    notice.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Theme::MUTED_TEXT),
                ),
                Span::styled(notice.text.clone(), Style::default().fg(color)),
            ]);
        }
    }

    let mut spans = Vec::new();
    let mut hint = |key: &'static str, label: &'static str| {
        spans.push(Span::styled(key, Style::default().fg(Theme::INFO)));
        spans.push(Span::raw(label));
    };

    match state.screen() {
        Screen::Login => {
            hint("Tab", ":field ");
            hint("Enter", ":authenticate ");
            hint("Esc", ":quit");
        }
        Screen::Chat => {
            hint("↑/↓", ":agent ");
            hint("Enter", ":send ");
            hint("PgUp/PgDn", ":scroll ");
            hint("^L", ":logout ");
            hint("F1", ":help ");
            hint("^C", ":quit");
        }
    }

    Line::from(spans)
}
