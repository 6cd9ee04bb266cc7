//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

pub const TITLE_COLOR: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;

pub const ROW_ALT_BG: Color = Color::Indexed(235);
pub const INDEX_COLOR: Color = Color::DarkGray;
pub const HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
pub const ROW_SELECTED: Style = Style::new().add_modifier(Modifier::REVERSED);

pub const STAT_SELECTED: Style = Style::new()
    .add_modifier(Modifier::BOLD)
    .add_modifier(Modifier::REVERSED);

pub const STATUS_BAR_BG: Color = Color::Indexed(236);
pub const STATUS_KEY_COLOR: Color = Color::Cyan;
pub const FLASH_SUCCESS: Color = Color::Green;
pub const FLASH_ERROR: Color = Color::Red;

pub const BAR_EMPTY: Color = Color::DarkGray;
pub const LEGENDARY_COLOR: Color = Color::Yellow;

/// Color for a match count (traffic light pattern): full matches green,
/// near misses yellow, the rest red.
pub fn ratio_color(satisfied: u8) -> Color {
    if satisfied >= 6 {
        Color::Green
    } else if satisfied >= 4 {
        Color::Yellow
    } else {
        Color::Red
    }
}
