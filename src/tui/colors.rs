//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Page title and focused borders
pub const ACCENT: Color = Color::Rgb(196, 120, 60);
/// Quote text
pub const QUOTE: Color = Color::Rgb(230, 215, 180);
/// Completed tasks
pub const DONE: Color = Color::DarkGray;
/// Delete action
pub const DANGER: Color = Color::Rgb(170, 30, 30);
