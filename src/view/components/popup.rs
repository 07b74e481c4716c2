use ratatui::layout::Rect;

/// Rect taking `percent_x` / `percent_y` of `area`, centered within it.
/// Never larger than `area`, so tiny terminals get the whole screen.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn scale(len: u16, percent: u16) -> u16 {
    let scaled = u32::from(len) * u32::from(percent.min(100)) / 100;
    // u16 fits: scaled <= len
    (scaled as u16).max(1).min(len)
}
