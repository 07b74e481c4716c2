use ratatui::Frame;

use crate::app::{AppState, Screen};

pub mod chat;
pub mod components;
pub mod login;

pub use chat::render_chat;
pub use login::render_login;

/// Main view dispatcher.
/// Routes to the login or chat screen, then overlays help if active.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match state.screen() {
        Screen::Login => login::render_login(frame, state, area),
        Screen::Chat => chat::render_chat(frame, state, area),
    }

    if state.show_help {
        components::help_overlay::render_help_overlay(frame);
    }
}
