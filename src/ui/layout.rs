//! Screen regions for the chat layout.
//!
//! ```text
//! ┌ title ─────────────────────────┐  1 row
//! │ ● status                       │  1 row
//! ╭ WebSocket URL ─────────────────╮  3 rows
//! │ messages (fills)               │
//! ╭ Message ───────────────────────╮  3 rows
//!   key hints                         1 row
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

const TITLE_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const FIELD_HEIGHT: u16 = 3;
const HINTS_HEIGHT: u16 = 1;

/// Minimum rows kept for the message list
pub const MIN_MESSAGES_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub title: Rect,
    pub status: Rect,
    pub url_field: Rect,
    pub messages: Rect,
    pub message_input: Rect,
    pub hints: Rect,
}

impl ChatLayout {
    pub fn new(area: Rect) -> Self {
        let [title, status, url_field, messages, message_input, hints] = Layout::vertical([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(MIN_MESSAGES_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(HINTS_HEIGHT),
        ])
        .areas(area);

        Self {
            title,
            status,
            url_field,
            messages,
            message_input,
            hints,
        }
    }
}
