//! The scrolling message list.
//!
//! Holds what the message area shows: an empty-state placeholder until the
//! first real content arrives, then chat bubbles and notices in arrival
//! order. Appending always snaps the view back to the newest entry.
//!
//! Everything a bubble displays is derived here, once, when it is appended:
//! the palette index and avatar come from the sender id, the time label from
//! the payload timestamp (or the current time).

use chrono::{DateTime, Local};

use super::scroll_state::ScrollState;
use crate::models::Severity;
use crate::websocket::ChatMessage;

/// Number of sender color schemes.
pub const PALETTE_SIZE: usize = 6;

/// Avatar label for messages without a sender id.
pub const SYSTEM_AVATAR: &str = "SY";

/// Display name for messages without a sender id.
pub const SYSTEM_NAME: &str = "System";

/// Text of the empty-state placeholder.
pub const EMPTY_STATE_TEXT: &str = "No messages yet. Connect and start chatting!";

/// Stable palette index for a sender: first UTF-16 code unit modulo the palette size.
pub fn palette_index(connection_id: Option<&str>) -> usize {
    connection_id
        .and_then(|id| id.encode_utf16().next())
        .map(|unit| unit as usize % PALETTE_SIZE)
        .unwrap_or(0)
}

/// First two characters of the sender id, uppercased.
pub fn avatar_label(connection_id: Option<&str>) -> String {
    match connection_id {
        Some(id) if !id.is_empty() => id.chars().take(2).collect::<String>().to_uppercase(),
        _ => SYSTEM_AVATAR.to_string(),
    }
}

pub fn display_name(connection_id: Option<&str>) -> String {
    match connection_id {
        Some(id) if !id.is_empty() => format!("User {}", id.chars().take(8).collect::<String>()),
        _ => SYSTEM_NAME.to_string(),
    }
}

/// Local wall-clock time label.
pub fn format_time(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

/// A rendered chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatBubble {
    pub palette_index: usize,
    pub avatar: String,
    pub sender: String,
    pub time: String,
    pub body: String,
    pub message_id: Option<String>,
}

impl ChatBubble {
    pub fn from_message(message: &ChatMessage, now: DateTime<Local>) -> Self {
        let sender_id = message.connection_id.as_deref();
        let time = message
            .timestamp
            .map(|ts| ts.with_timezone(&Local))
            .unwrap_or(now);

        Self {
            palette_index: palette_index(sender_id),
            avatar: avatar_label(sender_id),
            sender: display_name(sender_id),
            time: format_time(time),
            body: message
                .message
                .clone()
                .unwrap_or_else(|| message.raw.clone()),
            message_id: message.message_id.clone(),
        }
    }
}

/// A rendered system notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeEntry {
    pub severity: Severity,
    pub text: String,
    pub time: String,
}

impl NoticeEntry {
    pub fn new(text: &str, severity: Severity, now: DateTime<Local>) -> Self {
        Self {
            severity,
            text: text.to_string(),
            time: format_time(now),
        }
    }

    /// Icon followed by the notice text.
    pub fn display_text(&self) -> String {
        format!("{} {}", self.severity.icon(), self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Placeholder,
    Chat(ChatBubble),
    Notice(NoticeEntry),
}

#[derive(Debug, Clone)]
pub struct MessageList {
    entries: Vec<Entry>,
    pub scroll: ScrollState,
}

impl Default for MessageList {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageList {
    /// A list showing only the empty-state placeholder.
    pub fn new() -> Self {
        Self {
            entries: vec![Entry::Placeholder],
            scroll: ScrollState::new(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_placeholder(&self) -> bool {
        self.entries.iter().any(|e| matches!(e, Entry::Placeholder))
    }

    /// Append a chat message bubble.
    pub fn append_chat_message(&mut self, message: &ChatMessage, now: DateTime<Local>) {
        self.append(Entry::Chat(ChatBubble::from_message(message, now)));
    }

    /// Append a centered system notice stamped with `now`.
    pub fn append_system_notice(&mut self, text: &str, severity: Severity, now: DateTime<Local>) {
        self.append(Entry::Notice(NoticeEntry::new(text, severity, now)));
    }

    fn append(&mut self, entry: Entry) {
        self.clear_placeholder();
        self.entries.push(entry);
        self.scroll.scroll_to_bottom();
    }

    /// Drop the placeholder, but only when it is the sole entry.
    fn clear_placeholder(&mut self) {
        if self.entries.len() == 1 && self.entries[0] == Entry::Placeholder {
            self.entries.clear();
        }
    }
}
