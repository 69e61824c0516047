//! Transport trait abstraction.
//!
//! Provides a trait-based abstraction over the socket transport so the
//! session controller can be driven by a real WebSocket in production and
//! by a scripted mock in tests.
//!
//! Transports never call back into the controller directly. Lifecycle
//! callbacks are delivered as [`SessionSignal`]s through an [`EventSink`],
//! and the UI loop feeds them to the controller one at a time.

use tokio::sync::mpsc;

use crate::websocket::WsError;

/// Identifies one connection attempt. Monotonically increasing per session.
pub type ConnectionId = u64;

/// Lifecycle callback reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Opening handshake completed
    Opened,
    /// A text frame arrived
    Message(String),
    /// The transport reported an error; a `Closed` event always follows
    Error(String),
    /// The connection is gone
    Closed { code: u16, reason: String },
}

/// Everything the session's dispatch queue processes besides UI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSignal {
    /// A transport callback for the given connection
    Transport {
        id: ConnectionId,
        event: TransportEvent,
    },
    /// The heartbeat timer fired for the given connection
    HeartbeatTick { id: ConnectionId },
}

/// Channel end handed to a transport, tagged with its connection id.
#[derive(Debug, Clone)]
pub struct EventSink {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<SessionSignal>,
}

impl EventSink {
    pub fn new(id: ConnectionId, tx: mpsc::UnboundedSender<SessionSignal>) -> Self {
        Self { id, tx }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Report a lifecycle event. Returns false if the session is gone.
    pub fn emit(&self, event: TransportEvent) -> bool {
        self.tx
            .send(SessionSignal::Transport { id: self.id, event })
            .is_ok()
    }
}

/// An open (or opening) connection owned by the session.
pub trait ConnectionHandle: Send {
    /// Queue a text frame. Fails unless the connection is open.
    fn send_text(&self, text: String) -> Result<(), WsError>;

    /// Request graceful closure. Completion is reported as `TransportEvent::Closed`.
    fn close(&self, code: u16, reason: &str);
}

/// Opens connections.
///
/// `open` must not block: it starts the attempt and returns a handle
/// immediately. The outcome is reported through `sink`.
pub trait Connector: Send + Sync {
    fn open(&self, url: &str, sink: EventSink) -> Box<dyn ConnectionHandle>;
}
