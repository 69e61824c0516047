//! Input Field Component
//!
//! A bordered single-line field with focus and disabled states. Text wider
//! than the field scrolls horizontally to keep the cursor visible.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::domain::TextField;
use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_INPUT_BG};

/// Configuration for rendering an input field
#[derive(Debug, Clone)]
pub struct InputFieldConfig<'a> {
    /// Shown in the top border
    pub label: &'a str,
    pub field: &'a TextField,
    pub focused: bool,
    pub enabled: bool,
    /// Shown dimmed while the field is empty
    pub placeholder: Option<&'a str>,
}

impl<'a> InputFieldConfig<'a> {
    pub fn new(label: &'a str, field: &'a TextField) -> Self {
        Self {
            label,
            field,
            focused: false,
            enabled: true,
            placeholder: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Takes keyboard input: focused and enabled.
    pub fn is_active(&self) -> bool {
        self.focused && self.enabled
    }
}

/// The visible slice of `text` and the cursor column within it.
///
/// Skips leading characters until the cursor fits in `width` columns.
pub fn visible_window(text: &str, cursor: usize, width: u16) -> (String, u16) {
    let width = width as usize;
    if width == 0 {
        return (String::new(), 0);
    }

    let chars: Vec<char> = text.chars().collect();
    let col_of = |from: usize, to: usize| -> usize {
        chars[from..to]
            .iter()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    };

    let cursor = cursor.min(chars.len());
    let mut start = 0;
    while start < cursor && col_of(start, cursor) >= width {
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for c in &chars[start..] {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        visible.push(*c);
    }

    (visible, col_of(start, cursor) as u16)
}

pub fn render_input_field(frame: &mut Frame, area: Rect, config: &InputFieldConfig) {
    let border_color = if config.is_active() {
        COLOR_ACCENT
    } else {
        COLOR_BORDER
    };
    let label_style = if config.enabled {
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_DIM)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(Line::from(Span::styled(format!(" {} ", config.label), label_style)))
        .style(Style::default().bg(COLOR_INPUT_BG));

    let inner = block.inner(area);
    let (visible, cursor_col) =
        visible_window(config.field.text(), config.field.cursor(), inner.width);

    let content = match config.placeholder {
        Some(placeholder) if config.field.is_empty() => {
            Span::styled(placeholder.to_string(), Style::default().fg(COLOR_DIM))
        }
        _ => {
            let fg = if config.enabled { Color::White } else { COLOR_DIM };
            Span::styled(visible, Style::default().fg(fg))
        }
    };

    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if config.is_active() && inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position(Position::new(
            inner.x + cursor_col.min(inner.width - 1),
            inner.y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let field = TextField::with_value("abc");
        let config = InputFieldConfig::new("Label", &field)
            .focused(true)
            .enabled(false)
            .placeholder("type here");
        assert!(config.focused);
        assert!(!config.enabled);
        assert!(!config.is_active());
        assert_eq!(config.placeholder, Some("type here"));
    }

    #[test]
    fn test_visible_window_fits() {
        assert_eq!(visible_window("hello", 5, 10), ("hello".to_string(), 5));
        assert_eq!(visible_window("hello", 2, 10), ("hello".to_string(), 2));
    }

    #[test]
    fn test_visible_window_scrolls_to_cursor() {
        let (visible, col) = visible_window("abcdefghij", 10, 4);
        assert_eq!(visible, "hij");
        assert_eq!(col, 3);
    }

    #[test]
    fn test_visible_window_wide_chars() {
        let (visible, col) = visible_window("日本語", 3, 4);
        assert_eq!(visible, "語");
        assert_eq!(col, 2);
    }

    #[test]
    fn test_visible_window_zero_width() {
        assert_eq!(visible_window("abc", 1, 0), (String::new(), 0));
    }
}
