use ratatui::style::Color;

use super::Role;

/// Dark palette shared by every screen.
pub struct Theme;

impl Theme {
    // Surfaces
    pub const BACKGROUND: Color = Color::Rgb(18, 18, 24);
    pub const HEADER_BG: Color = Color::Rgb(24, 24, 32);
    pub const FOOTER_BG: Color = Color::Rgb(24, 24, 32);
    pub const SELECTION_BG: Color = Color::Rgb(40, 55, 75);

    // Text
    pub const TEXT: Color = Color::Rgb(225, 225, 235);
    pub const MUTED_TEXT: Color = Color::Rgb(100, 105, 120);

    // Accents: teal for chrome, amber while a call is in flight, purple for agents
    pub const ACCENT: Color = Color::Rgb(80, 200, 200);
    pub const ACCENT_WARM: Color = Color::Rgb(230, 160, 60);
    pub const ACCENT_PURPLE: Color = Color::Rgb(170, 130, 255);

    // Status
    pub const SUCCESS: Color = Color::Rgb(80, 210, 120);
    pub const WARNING: Color = Color::Rgb(230, 180, 60);
    pub const ERROR: Color = Color::Rgb(230, 80, 80);
    pub const INFO: Color = Color::Rgb(80, 180, 220);

    // Borders
    pub const PANEL_BORDER: Color = Color::Rgb(50, 50, 65);
    pub const ACTIVE_BORDER: Color = Self::ACCENT;

    /// Speaker label color in the transcript.
    pub fn role_color(role: Role) -> Color {
        match role {
            Role::User => Self::INFO,
            Role::Assistant => Self::ACCENT_PURPLE,
        }
    }
}
