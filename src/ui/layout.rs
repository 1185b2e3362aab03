// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions shared by every view.
pub struct AppLayout {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

/// Creates the main application layout.
///
/// The frame is split into a three-row header with the service status, the
/// active view, and a single-row footer with key hints.
///
/// # Arguments
///
/// * `frame_size` - The full area of the terminal frame.
///
/// # Returns
///
/// An `AppLayout` with a `Rect` for each region.
pub fn create_layout(frame_size: Rect) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    AppLayout {
        header: main_chunks[0],
        content: main_chunks[1],
        footer: main_chunks[2],
    }
}

/// Helper function to create a centered rect using up a certain percentage of the available rect `r`.
///
/// # Arguments
///
/// * `percent_x` - Width of the result as a percentage of `r`.
/// * `percent_y` - Height of the result as a percentage of `r`.
/// * `r` - The area to center within.
///
/// # Returns
///
/// A `Rect` centered in `r`, used by the alert popup.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
