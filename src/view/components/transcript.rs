use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{AppState, Command};
use crate::model::{Message, Role, Theme};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Render the transcript of the agent on screen, newest at the bottom.
pub fn render_transcript(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::ACTIVE_BORDER))
        .title(" Conversation ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = build_transcript_lines(state, inner.width as usize);
    let offset = scroll_offset(lines.len(), inner.height as usize, state.transcript_scroll);

    let paragraph = Paragraph::new(lines).scroll((scroll_row(offset), 0));
    frame.render_widget(paragraph, inner);
}

/// First visible line so the bottom sits `from_bottom` lines above the end.
pub fn scroll_offset(total: usize, height: usize, from_bottom: usize) -> usize {
    let max_offset = total.saturating_sub(height);
    max_offset.saturating_sub(from_bottom)
}

/// Paragraph scroll row; saturates for transcripts longer than `u16::MAX` lines.
pub fn scroll_row(offset: usize) -> u16 {
    u16::try_from(offset).unwrap_or(u16::MAX)
}

/// Pure function: lay out messages as pre-wrapped lines.
pub fn build_transcript_lines(state: &AppState, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(transcript) = state.transcript() {
        for message in transcript.iter() {
            push_message(&mut lines, message, width);
        }
    }

    // Optimistic echo while the turn is in flight
    if let Some(Command::Submit(text)) = &state.running {
        push_message(&mut lines, &Message::user(text.clone()), width);
        let frame = SPINNER[state.spinner_frame % SPINNER.len()];
        lines.push(Line::from(Span::styled(
            format!("{frame} Agent is thinking..."),
            Style::default().fg(Theme::ACCENT_WARM),
        )));
    } else if let Some(Command::SwitchAgent(agent)) = &state.running {
        lines.push(Line::from(Span::styled(
            format!("Loading history for {agent}..."),
            Style::default().fg(Theme::MUTED_TEXT),
        )));
    } else if lines.is_empty() && state.viewed_agent().is_some() {
        lines.push(Line::from(Span::styled(
            "No messages yet.",
            Style::default()
                .fg(Theme::MUTED_TEXT)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

fn push_message(lines: &mut Vec<Line<'static>>, message: &Message, width: usize) {
    lines.push(Line::from(Span::styled(
        message.role.label(),
        Style::default()
            .fg(Theme::role_color(message.role))
            .add_modifier(Modifier::BOLD),
    )));

    let color = match message.role {
        Role::Assistant if message.content.starts_with("Error:") => Theme::ERROR,
        _ => Theme::TEXT,
    };
    for raw in message.content.lines() {
        for chunk in wrap(raw, width.max(1)) {
            lines.push(Line::from(Span::styled(chunk, Style::default().fg(color))));
        }
    }
    lines.push(Line::from(""));
}

/// Hard-wrap on character count. Empty input yields one empty line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}
