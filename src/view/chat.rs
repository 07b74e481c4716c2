use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::AppState;

use super::components::{
    render_agent_list, render_footer, render_header, render_input, render_transcript,
};

/// Render the chat screen: header, agent sidebar, transcript, input, footer.
pub fn render_chat(frame: &mut Frame, state: &AppState, area: Rect) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Sidebar + transcript
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(28), // Agent picker
            Constraint::Min(20),    // Transcript
        ])
        .split(main_layout[1]);

    render_header(frame, main_layout[0], state);
    render_agent_list(frame, columns[0], state);
    render_transcript(frame, columns[1], state);
    render_input(frame, main_layout[2], state);
    render_footer(frame, main_layout[3], state);
}
