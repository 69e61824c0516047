//! WebSocket transport for chat rooms.
//!
//! This module provides the wire payloads exchanged with the chat server and
//! a tokio-tungstenite client that runs each connection in a background task
//! and reports lifecycle events back to the session.

pub mod client;
pub mod messages;

pub use client::{
    WsClient, WsClientConfig, WsError, ABNORMAL_CLOSURE, NORMAL_CLOSURE, NO_STATUS_RECEIVED,
};
pub use messages::{ChatMessage, InboundFrame, OutgoingAction};
