use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// Screen regions of the single form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormAreas {
    pub title: Rect,
    pub input: Rect,
    pub action: Rect,
    pub output: Rect,
    pub notice: Rect,
    pub hints: Rect,
}

pub fn form_areas(area: Rect) -> FormAreas {
    let [title, input, action, output, notice, _, hints] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .horizontal_margin(2)
    .vertical_margin(1)
    .areas(area);

    FormAreas {
        title,
        input,
        action,
        output,
        notice,
        hints,
    }
}

/// Terminal columns `text` occupies; wide (CJK) characters take two.
pub fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Horizontal scroll, in columns, that keeps the end of `text` (where the
/// cursor sits) inside a bordered box of `width`.
pub fn input_scroll(text: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(3);
    text_width(text).saturating_sub(inner)
}
