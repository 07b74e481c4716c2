use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{AppState, LoginField, NoticeLevel};
use crate::model::Theme;

use super::components::popup::centered_rect;
use super::components::render_footer;

/// Render the sign-in form centered on screen.
pub fn render_login(frame: &mut Frame, state: &AppState, area: Rect) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(area);

    let form_area = centered_rect(60, 60, outer[0]);
    frame.render_widget(Clear, form_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::ACTIVE_BORDER))
        .title(" Mission Control Login ");
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Min(1),    // Status
        ])
        .split(inner);

    render_field(
        frame,
        rows[0],
        "Email",
        &state.login.email,
        state.login.focus == LoginField::Email,
    );
    render_field(
        frame,
        rows[1],
        "Password",
        &mask(&state.login.password),
        state.login.focus == LoginField::Password,
    );

    frame.render_widget(Paragraph::new(build_status_line(state)), rows[2]);
    render_footer(frame, outer[1], state);
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        Theme::ACTIVE_BORDER
    } else {
        Theme::PANEL_BORDER
    };
    let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(Theme::TEXT))];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Theme::ACCENT)));
    }

    let field = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {label} ")),
    );
    frame.render_widget(field, area);
}

/// Password shown as one bullet per character.
pub fn mask(password: &str) -> String {
    "•".repeat(password.chars().count())
}

fn build_status_line(state: &AppState) -> Line<'static> {
    if state.is_busy() {
        return Line::from(Span::styled(
            "Authenticating...",
            Style::default().fg(Theme::ACCENT_WARM),
        ));
    }
    match state.latest_notice() {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Warning => Theme::WARNING,
                NoticeLevel::Error => Theme::ERROR,
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "Enter to authenticate",
            Style::default()
                .fg(Theme::MUTED_TEXT)
                .add_modifier(Modifier::ITALIC),
        )),
    }
}
