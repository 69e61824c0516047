//! Common test utilities for integration tests.
//!
//! [`TestHarness`] wires an [`App`] to the mock transport and endpoint store
//! and plays the main loop's part: signals the mock emits are fed back
//! through `App::handle_signal` by [`TestHarness::pump`].
//!
//! ```ignore
//! let mut h = TestHarness::new();
//! h.connect("ws://localhost:9999");
//! h.open();
//! h.server_sends(r#"{"message":"hi"}"#);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use parley::adapters::mock::{InMemoryEndpointStore, MockConnection, MockConnector};
use parley::app::App;
use parley::input::Command;
use parley::session::{ChatSession, HEARTBEAT_PERIOD};
use parley::traits::{SessionSignal, TransportEvent};
use parley::view_state::{ChatBubble, Entry, NoticeEntry};
use tokio::sync::mpsc;

pub struct TestHarness {
    pub app: App,
    pub signal_rx: mpsc::UnboundedReceiver<SessionSignal>,
    pub connector: MockConnector,
    pub store: InMemoryEndpointStore,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_store(InMemoryEndpointStore::new())
    }

    pub fn with_store(store: InMemoryEndpointStore) -> Self {
        let connector = MockConnector::new();
        let (session, signal_rx) = ChatSession::new(
            Arc::new(connector.clone()),
            Arc::new(store.clone()),
            HEARTBEAT_PERIOD,
        );
        Self {
            app: App::new(session, None),
            signal_rx,
            connector,
            store,
        }
    }

    /// Replace the URL field and press Enter.
    pub fn connect(&mut self, url: &str) {
        self.app.execute_command(Command::ClearField);
        self.app.execute_command(Command::Paste(url.to_string()));
        self.app.execute_command(Command::Submit);
    }

    /// Type into the message input and press Enter.
    pub fn send(&mut self, text: &str) {
        self.app.execute_command(Command::Paste(text.to_string()));
        self.app.execute_command(Command::Submit);
    }

    pub fn connection(&self) -> MockConnection {
        self.connector
            .last_connection()
            .expect("a connection should have been opened")
    }

    /// Deliver every queued signal to the app.
    pub fn pump(&mut self) {
        while let Ok(signal) = self.signal_rx.try_recv() {
            self.app.handle_signal(signal);
        }
    }

    pub fn emit(&mut self, event: TransportEvent) {
        self.connection().emit(event);
        self.pump();
    }

    /// Complete the handshake. Starts the heartbeat, so needs a runtime.
    pub fn open(&mut self) {
        self.emit(TransportEvent::Opened);
    }

    pub fn server_sends(&mut self, raw: &str) {
        self.emit(TransportEvent::Message(raw.to_string()));
    }

    pub fn server_closes(&mut self, code: u16, reason: &str) {
        self.emit(TransportEvent::Closed {
            code,
            reason: reason.to_string(),
        });
    }

    pub fn notices(&self) -> Vec<NoticeEntry> {
        self.app
            .messages
            .entries()
            .iter()
            .filter_map(|e| match e {
                Entry::Notice(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn notice_texts(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.text).collect()
    }

    pub fn bubbles(&self) -> Vec<ChatBubble> {
        self.app
            .messages
            .entries()
            .iter()
            .filter_map(|e| match e {
                Entry::Chat(b) => Some(b.clone()),
                _ => None,
            })
            .collect()
    }
}
