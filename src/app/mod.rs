//! Application state for the chat screen.
//!
//! [`App`] is the single owner of the [`ChatSession`] and of everything the
//! UI draws. The main loop feeds it three kinds of input, one at a time:
//! terminal events (through [`App::handle_key`] and friends), session
//! signals (through [`App::handle_signal`]) and animation ticks. After each
//! one it folds the session's published updates into the view state.

mod handlers;
mod types;

pub use types::Focus;

use chrono::Local;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

use crate::domain::TextField;
use crate::input::KeybindingConfig;
use crate::session::{ChatSession, Lifecycle, SessionUpdate};
use crate::traits::SessionSignal;
use crate::view_state::{ConnectionStatus, ControlState, MessageList};

pub struct App {
    pub session: ChatSession,
    updates: broadcast::Receiver<SessionUpdate>,
    keybindings: KeybindingConfig,
    /// Lifecycle as last published by the session
    pub lifecycle: Lifecycle,
    pub messages: MessageList,
    pub url_input: TextField,
    pub message_input: TextField,
    pub focus: Focus,
    /// Animation counter, advanced by the main loop
    pub tick_count: u64,
    /// Height of the message viewport at last render, for page scrolling
    pub viewport_height: u16,
    pub should_quit: bool,
    pub needs_redraw: bool,
}

impl App {
    /// Create the app. The URL field is pre-filled with `initial_url`, or the
    /// saved endpoint when none is given.
    pub fn new(session: ChatSession, initial_url: Option<String>) -> Self {
        let updates = session.subscribe();
        let url = initial_url.unwrap_or_else(|| session.saved_endpoint());
        let lifecycle = session.lifecycle();

        Self {
            session,
            updates,
            keybindings: KeybindingConfig::new(),
            lifecycle,
            messages: MessageList::new(),
            url_input: TextField::with_value(url),
            message_input: TextField::new(),
            focus: Focus::UrlField,
            tick_count: 0,
            viewport_height: 0,
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        ConnectionStatus::from(self.lifecycle)
    }

    pub fn controls(&self) -> ControlState {
        ControlState::for_lifecycle(self.lifecycle)
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance animations. Redraws only while the status dot pulses.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.status().is_pulsing() {
            self.mark_dirty();
        }
    }

    /// Feed one queued signal to the session, then apply what it published.
    pub fn handle_signal(&mut self, signal: SessionSignal) {
        self.session.dispatch(signal);
        self.sync_updates();
    }

    /// Apply every update the session has published since the last call.
    pub fn sync_updates(&mut self) {
        loop {
            match self.updates.try_recv() {
                Ok(update) => self.apply_update(update),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Dropped {} session updates", skipped);
                    // Controls must still track the real lifecycle
                    let lifecycle = self.session.lifecycle();
                    if lifecycle != self.lifecycle {
                        self.apply_update(SessionUpdate::LifecycleChanged(lifecycle));
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Fold one session update into the view state.
    pub fn apply_update(&mut self, update: SessionUpdate) {
        match update {
            SessionUpdate::LifecycleChanged(lifecycle) => {
                self.lifecycle = lifecycle;
                match lifecycle {
                    Lifecycle::Open => self.focus = Focus::MessageInput,
                    Lifecycle::Idle => self.focus = Focus::UrlField,
                    Lifecycle::Connecting | Lifecycle::Closing => {}
                }
            }
            SessionUpdate::MessageReceived(message) => {
                self.messages.append_chat_message(&message, Local::now());
            }
            SessionUpdate::Notice(notice) => {
                self.messages
                    .append_system_notice(&notice.text, notice.severity, Local::now());
            }
        }
        self.mark_dirty();
    }

    /// Close any connection and stop.
    pub fn quit(&mut self) {
        self.session.shutdown();
        self.sync_updates();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::mock::{InMemoryEndpointStore, MockConnector};
    use crate::models::{Notice, Severity};
    use crate::session::HEARTBEAT_PERIOD;
    use crate::view_state::Entry;
    use crate::websocket::ChatMessage;

    pub(super) fn create_test_app() -> (App, MockConnector) {
        let connector = MockConnector::new();
        let (session, _rx) = ChatSession::new(
            Arc::new(connector.clone()),
            Arc::new(InMemoryEndpointStore::new()),
            HEARTBEAT_PERIOD,
        );
        (App::new(session, None), connector)
    }

    #[test]
    fn test_url_field_prefilled_with_saved_endpoint() {
        let (session, _rx) = ChatSession::new(
            Arc::new(MockConnector::new()),
            Arc::new(InMemoryEndpointStore::with_endpoint("ws://localhost:9999")),
            HEARTBEAT_PERIOD,
        );
        let app = App::new(session, None);
        assert_eq!(app.url_input.text(), "ws://localhost:9999");
    }

    #[test]
    fn test_initial_url_overrides_saved_endpoint() {
        let (session, _rx) = ChatSession::new(
            Arc::new(MockConnector::new()),
            Arc::new(InMemoryEndpointStore::with_endpoint("ws://saved")),
            HEARTBEAT_PERIOD,
        );
        let app = App::new(session, Some("ws://flag".to_string()));
        assert_eq!(app.url_input.text(), "ws://flag");
    }

    #[test]
    fn test_initial_state_is_disconnected() {
        let (app, _) = create_test_app();
        assert_eq!(app.status(), ConnectionStatus::Disconnected);
        assert_eq!(app.controls(), ControlState::for_lifecycle(Lifecycle::Idle));
        assert_eq!(app.messages.entries(), &[Entry::Placeholder]);
    }

    #[test]
    fn test_lifecycle_updates_move_focus() {
        let (mut app, _) = create_test_app();

        app.apply_update(SessionUpdate::LifecycleChanged(Lifecycle::Open));
        assert_eq!(app.focus, Focus::MessageInput);
        assert!(app.controls().send);

        app.apply_update(SessionUpdate::LifecycleChanged(Lifecycle::Idle));
        assert_eq!(app.focus, Focus::UrlField);
        assert!(app.controls().connect);
    }

    #[test]
    fn test_notice_and_message_updates_append_entries() {
        let (mut app, _) = create_test_app();
        app.needs_redraw = false;

        app.apply_update(SessionUpdate::Notice(Notice::warning("Disconnected: bye")));
        app.apply_update(SessionUpdate::MessageReceived(ChatMessage {
            connection_id: Some("AbCd".to_string()),
            message: Some("hi".to_string()),
            timestamp: None,
            message_id: None,
            raw: String::new(),
        }));

        assert!(app.needs_redraw);
        let entries = app.messages.entries();
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], Entry::Notice(n) if n.severity == Severity::Warning));
        assert!(matches!(&entries[1], Entry::Chat(b) if b.body == "hi"));
    }

    #[test]
    fn test_lagged_updates_resync_lifecycle() {
        let (mut app, _) = create_test_app();
        app.lifecycle = Lifecycle::Open;

        // Overflow the broadcast buffer with notices the app never read
        for i in 0..2000 {
            app.session.send_message(&format!("msg {}", i)).ok();
        }
        app.sync_updates();

        assert_eq!(app.lifecycle, Lifecycle::Idle);
        assert_eq!(app.focus, Focus::UrlField);
    }

    #[test]
    fn test_tick_redraws_only_while_pulsing() {
        let (mut app, _) = create_test_app();
        app.needs_redraw = false;
        app.tick();
        assert!(!app.needs_redraw);

        app.lifecycle = Lifecycle::Open;
        app.tick();
        assert!(app.needs_redraw);
        assert_eq!(app.tick_count, 2);
    }
}
