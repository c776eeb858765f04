//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas shared by both views
pub struct ScreenLayout {
    pub tabs: Rect,
    pub body: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Areas of the table browser body
pub struct BrowserLayout {
    pub banner: Option<Rect>,
    pub list: Rect,
    pub data: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + area.width.saturating_sub(width) / 2;
    let popup_y = area.y + area.height.saturating_sub(height) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Tab bar, view body, one status line and the key hint bar
pub fn calculate_screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        tabs: chunks[0],
        body: chunks[1],
        status: chunks[2],
        help: chunks[3],
    }
}

/// Optional error banner over a table list (left) and the row grid (right)
pub fn calculate_browser_layout(area: Rect, has_error: bool) -> BrowserLayout {
    let (banner, content) = if has_error {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, area)
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(content);

    BrowserLayout {
        banner,
        list: columns[0],
        data: columns[1],
    }
}
