//! Mock transport for testing.
//!
//! Records every connection the session opens, captures outgoing frames and
//! close requests, and lets tests inject lifecycle events through the same
//! sink a real transport would use.

use std::sync::{Arc, Mutex};

use crate::traits::{ConnectionHandle, ConnectionId, Connector, EventSink, TransportEvent};
use crate::websocket::WsError;

#[derive(Debug, Default)]
struct MockConnectionState {
    sent: Vec<String>,
    close_requests: Vec<(u16, String)>,
    send_should_fail: bool,
}

/// One connection opened through a [`MockConnector`].
#[derive(Debug, Clone)]
pub struct MockConnection {
    url: String,
    sink: EventSink,
    state: Arc<Mutex<MockConnectionState>>,
}

impl MockConnection {
    /// The URL passed to `open`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The connection id assigned by the session.
    pub fn id(&self) -> ConnectionId {
        self.sink.id()
    }

    /// Inject a lifecycle event as if the transport reported it.
    pub fn emit(&self, event: TransportEvent) {
        self.sink.emit(event);
    }

    /// Text frames sent through the handle, in order.
    pub fn sent_frames(&self) -> Vec<String> {
        self.state.lock().map(|s| s.sent.clone()).unwrap_or_default()
    }

    /// Close requests made through the handle, in order.
    pub fn close_requests(&self) -> Vec<(u16, String)> {
        self.state
            .lock()
            .map(|s| s.close_requests.clone())
            .unwrap_or_default()
    }

    /// Configure whether `send_text` should fail.
    pub fn set_send_should_fail(&self, should_fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.send_should_fail = should_fail;
        }
    }
}

struct MockHandle {
    state: Arc<Mutex<MockConnectionState>>,
}

impl ConnectionHandle for MockHandle {
    fn send_text(&self, text: String) -> Result<(), WsError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| WsError::SendFailed(e.to_string()))?;
        if state.send_should_fail {
            return Err(WsError::SendFailed("mock send failure".to_string()));
        }
        state.sent.push(text);
        Ok(())
    }

    fn close(&self, code: u16, reason: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.close_requests.push((code, reason.to_string()));
        }
    }
}

/// Mock connector for testing.
///
/// # Example
///
/// ```ignore
/// use parley::adapters::mock::MockConnector;
///
/// let connector = MockConnector::new();
/// // ... session.connect("ws://localhost:9999") ...
/// let conn = connector.last_connection().unwrap();
/// conn.emit(TransportEvent::Opened);
/// assert!(conn.sent_frames().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    connections: Arc<Mutex<Vec<MockConnection>>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connections opened so far.
    pub fn open_count(&self) -> usize {
        self.connections.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// The most recently opened connection.
    pub fn last_connection(&self) -> Option<MockConnection> {
        self.connections
            .lock()
            .ok()
            .and_then(|c| c.last().cloned())
    }
}

impl Connector for MockConnector {
    fn open(&self, url: &str, sink: EventSink) -> Box<dyn ConnectionHandle> {
        let state = Arc::new(Mutex::new(MockConnectionState::default()));
        let connection = MockConnection {
            url: url.to_string(),
            sink,
            state: state.clone(),
        };
        if let Ok(mut connections) = self.connections.lock() {
            connections.push(connection);
        }
        Box::new(MockHandle { state })
    }
}
