//! Message list rendering.
//!
//! Lines are wrapped here rather than by `Paragraph`, so the scroll range
//! computed from `lines.len()` is exact.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::ui::theme::{
    sender_color, severity_color, COLOR_AVATAR_TEXT, COLOR_BORDER, COLOR_DIM,
};
use crate::view_state::{
    ChatBubble, Entry, MessageList, NoticeEntry, ScrollState, EMPTY_STATE_TEXT,
};

/// Prefix of each bubble body line
const BODY_GUTTER: &str = "  │ ";

/// Greedy wrap to `width` display columns, preferring breaks at spaces.
///
/// Explicit newlines always break. Never returns an empty vec.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        let mut last_space: Option<usize> = None;

        for c in raw_line.chars() {
            let w = c.width().unwrap_or(0);
            if current_width + w > width && !current.is_empty() {
                if c == ' ' {
                    lines.push(current.trim_end().to_string());
                    current.clear();
                    current_width = 0;
                    last_space = None;
                    continue;
                }
                match last_space {
                    Some(at) if at > 0 => {
                        let rest = current.split_off(at);
                        lines.push(current.trim_end().to_string());
                        current = rest.trim_start().to_string();
                    }
                    _ => lines.push(std::mem::take(&mut current)),
                }
                current_width = current.width();
                last_space = None;
            }
            if c == ' ' {
                last_space = Some(current.len());
            }
            current.push(c);
            current_width += w;
        }
        lines.push(current);
    }

    lines
}

fn bubble_lines(bubble: &ChatBubble, width: u16) -> Vec<Line<'static>> {
    let color = sender_color(bubble.palette_index);
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" {} ", bubble.avatar),
            Style::default()
                .fg(COLOR_AVATAR_TEXT)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            bubble.sender.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", bubble.time), Style::default().fg(COLOR_DIM)),
    ])];

    let body_width = (width as usize).saturating_sub(BODY_GUTTER.width());
    for text in wrap_text(&bubble.body, body_width) {
        lines.push(Line::from(vec![
            Span::styled(BODY_GUTTER, Style::default().fg(color)),
            Span::raw(text),
        ]));
    }
    lines
}

fn notice_lines(notice: &NoticeEntry, width: u16) -> Vec<Line<'static>> {
    let style = Style::default().fg(severity_color(notice.severity));
    let mut lines: Vec<Line<'static>> = wrap_text(&notice.display_text(), width as usize)
        .into_iter()
        .map(|text| Line::from(Span::styled(text, style)).centered())
        .collect();
    lines.push(Line::from(Span::styled(notice.time.clone(), Style::default().fg(COLOR_DIM))).centered());
    lines
}

fn placeholder_lines() -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(EMPTY_STATE_TEXT, Style::default().fg(COLOR_DIM))).centered()]
}

/// All lines for the list at `width`, entries separated by a blank line.
pub fn build_message_lines(list: &MessageList, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, entry) in list.entries().iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        match entry {
            Entry::Placeholder => lines.extend(placeholder_lines()),
            Entry::Chat(bubble) => lines.extend(bubble_lines(bubble, width)),
            Entry::Notice(notice) => lines.extend(notice_lines(notice, width)),
        }
    }
    lines
}

/// Render the list scrolled to `app.messages.scroll`, recording the scroll range.
pub fn render_messages(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);

    let lines = build_message_lines(&app.messages, inner.width);
    let (start, end) = visible_window(lines.len(), inner.height, &mut app.messages.scroll);
    app.viewport_height = inner.height;

    let visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(end - start).collect();
    frame.render_widget(Paragraph::new(visible).block(block), area);
}

/// Line range `[start, end)` shown for `total` lines in a viewport of `height`.
///
/// Records the scroll range on `scroll`. The range is bounded by the
/// offset's type, but the window is always measured from the true end.
fn visible_window(total: usize, height: u16, scroll: &mut ScrollState) -> (usize, usize) {
    let max_scroll = total.saturating_sub(height as usize);
    scroll.set_max_scroll(max_scroll.min(u16::MAX as usize) as u16);

    let end = total - (scroll.offset as usize).min(max_scroll);
    let start = end.saturating_sub(height as usize);
    (start, end)
}
