//! Green campaign-builder palette and the styles views draw with.
//!
//! Views never use inline `Color::*` literals; step states, notification
//! levels and input focus each map to one style here.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use super::events::NotificationLevel;
use crate::core::campaign::wizard::StepStatus;

// ── Palette ─────────────────────────────────────────────────────────────────

/// Brand green. Current step, focused borders, headings.
pub const PRIMARY: Color = Color::Rgb(0x31, 0x85, 0x62);
/// Lighter green for selections and the text cursor.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x4C, 0xAF, 0x80);
/// Slate for help modal chrome.
pub const ACCENT: Color = Color::Rgb(0x58, 0x5A, 0x59);
/// Badge foreground.
pub const BG_BASE: Color = Color::Rgb(0x14, 0x16, 0x15);

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Text styles ─────────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

/// Section headings inside a step.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Selected template, cursor row, focused input.
pub fn highlight() -> Style {
    Style::default()
        .fg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Locked triggers and upcoming steps.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD)
}

// ── State styles ────────────────────────────────────────────────────────────

/// Label style for a wizard step or rewards stage.
pub fn step_status(status: StepStatus) -> Style {
    match status {
        StepStatus::Completed => Style::default().fg(SUCCESS),
        StepStatus::Current => highlight(),
        StepStatus::Upcoming => dim(),
    }
}

/// Prefix glyph and color for a notification.
pub fn notification(level: NotificationLevel) -> (&'static str, Style) {
    let (prefix, color) = match level {
        NotificationLevel::Info => ("ℹ", INFO),
        NotificationLevel::Success => ("✓", SUCCESS),
        NotificationLevel::Warning => ("⚠", WARNING),
        NotificationLevel::Error => ("✗", ERROR),
    };
    (prefix, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Text input value; the focused field gets the cursor color.
pub fn input(focused: bool) -> Style {
    if focused {
        highlight()
    } else {
        Style::default().fg(TEXT)
    }
}

fn badge(bg: Color) -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    badge(PRIMARY)
}

/// Shown while a text dialog captures keys.
pub fn insert_badge() -> Style {
    badge(PRIMARY_LIGHT)
}

// ── Blocks ──────────────────────────────────────────────────────────────────

fn titled_block(title: &str, border: Color) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

/// Block around the active step and dialogs.
pub fn block_focused(title: &str) -> Block<'_> {
    titled_block(title, PRIMARY)
}

/// Block around the header and step rail.
pub fn block_default(title: &str) -> Block<'_> {
    titled_block(title, TEXT_DIM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_status_styles_are_distinct() {
        let completed = step_status(StepStatus::Completed);
        let current = step_status(StepStatus::Current);
        let upcoming = step_status(StepStatus::Upcoming);
        assert_ne!(completed, current);
        assert_ne!(current, upcoming);
        assert_ne!(completed, upcoming);
    }

    #[test]
    fn test_notification_glyphs() {
        assert_eq!(notification(NotificationLevel::Success).0, "✓");
        assert_eq!(notification(NotificationLevel::Error).0, "✗");
        assert_ne!(
            notification(NotificationLevel::Warning).1,
            notification(NotificationLevel::Info).1
        );
    }

    #[test]
    fn test_focused_input_is_highlighted() {
        assert_eq!(input(true), highlight());
        assert_ne!(input(false), input(true));
    }
}
