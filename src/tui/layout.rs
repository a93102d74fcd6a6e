//! Root layout computation for header + step rail + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the step rail.
pub const RAIL_WIDTH: u16 = 28;
/// Hide the rail below this terminal width.
pub const HIDE_RAIL_THRESHOLD: u16 = 60;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Campaign header (name + progress).
    pub header: Rect,
    /// Step rail (None if hidden).
    pub rail: Option<Rect>,
    /// Active step content.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Rail + main
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let (rail, main) = if area.width < HIDE_RAIL_THRESHOLD {
            (None, rows[1])
        } else {
            let cols = Layout::horizontal([Constraint::Length(RAIL_WIDTH), Constraint::Min(1)])
                .split(rows[1]);
            (Some(cols[0]), cols[1])
        };

        Self {
            header: rows[0],
            rail,
            main,
            status: rows[2],
        }
    }
}

/// Rect of `percent_x` by `percent_y` centered inside `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}
