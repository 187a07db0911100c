use ratatui::style::Color;

pub const TITLE: &str = "Shortlink";
pub const INPUT_TITLE: &str = " Long URL ";
pub const OUTPUT_TITLE: &str = " Short URL ";
pub const ACTION_IDLE: &str = "[Enter] Shorten";
pub const ACTION_BUSY: &str = "Shortening...";
pub const KEY_HINTS: &str = "Enter: shorten | Ctrl+Y / F2: copy | Ctrl+U: clear | Esc: quit";

pub const SUCCESS_COLOR: Color = Color::Green;
pub const ERROR_COLOR: Color = Color::Red;
pub const ACCENT_COLOR: Color = Color::Cyan;
