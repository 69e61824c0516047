//! View-only data for the UI.
//!
//! Rendering is a pure function of these structures: the app loop folds
//! session updates into them and the `ui` module draws them without ever
//! touching the session.
//!
//! - [`MessageList`]: placeholder, chat bubbles and notices, in arrival order
//! - [`ConnectionStatus`] / [`ControlState`]: what the lifecycle allows
//! - [`ScrollState`]: message area scroll position

pub mod message_list;
mod scroll_state;
mod status;

pub use message_list::{
    avatar_label, display_name, format_time, palette_index, ChatBubble, Entry, MessageList,
    NoticeEntry, EMPTY_STATE_TEXT, PALETTE_SIZE,
};
pub use scroll_state::ScrollState;
pub use status::{ConnectionStatus, ControlState};
