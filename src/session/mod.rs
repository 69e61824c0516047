//! Chat session controller.
//!
//! [`ChatSession`] owns the single connection handle and the heartbeat
//! timer, and is driven from one place: the UI loop. User actions call
//! [`ChatSession::connect`], [`ChatSession::disconnect`] and
//! [`ChatSession::send_message`]; transport callbacks and timer ticks arrive
//! as [`SessionSignal`]s on the receiver returned by [`ChatSession::new`] and
//! are fed back through [`ChatSession::dispatch`]. Each call runs to
//! completion before the next, so no state is ever shared across threads.
//!
//! The presentation layer observes the session through
//! [`ChatSession::subscribe`].
//!
//! # Lifecycle
//!
//! ```text
//! Idle --connect--> Connecting --Opened--> Open
//!  ^                    |                    |
//!  |                disconnect           disconnect
//!  |                    v                    v
//!  +------Closed------ Closing <-------------+
//! ```
//!
//! `Closed` returns to `Idle` from any state.

pub mod heartbeat;

pub use heartbeat::{Heartbeat, HEARTBEAT_PERIOD};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use crate::models::{Notice, Severity};
use crate::traits::{
    ConnectionHandle, ConnectionId, Connector, EndpointStore, EventSink, SessionSignal,
    TransportEvent,
};
use crate::websocket::{ChatMessage, InboundFrame, OutgoingAction, NORMAL_CLOSURE};

/// Reason sent with a user-requested close.
pub const CLOSE_REASON_USER: &str = "User initiated disconnect";

const NOTICE_CONNECTED: &str = "Connected to chat server successfully! 🎉";
const NOTICE_CONNECTION_ERROR: &str =
    "Connection error occurred. Please check your URL and try again.";
const FALLBACK_CLOSE_REASON: &str = "Connection closed";

const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Where the session is in its connection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Idle,
    Connecting,
    Open,
    Closing,
}

impl Lifecycle {
    pub fn is_open(self) -> bool {
        matches!(self, Lifecycle::Open)
    }

    /// A connection handle exists.
    pub fn is_active(self) -> bool {
        !matches!(self, Lifecycle::Idle)
    }
}

/// Published to subscribers whenever something visible changes.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    LifecycleChanged(Lifecycle),
    MessageReceived(ChatMessage),
    Notice(Notice),
}

/// Rejected user actions. Each is also published as a notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Already connected. Disconnect first.")]
    AlreadyActive,
    #[error("Please enter WebSocket URL")]
    EmptyUrl,
    #[error("WebSocket URL must start with wss:// or ws://")]
    InvalidScheme,
    #[error("Please enter a message")]
    EmptyMessage,
    #[error("Not connected to server")]
    NotConnected,
    #[error("Failed to send message")]
    SendFailed,
}

impl SessionError {
    pub fn severity(&self) -> Severity {
        match self {
            SessionError::EmptyMessage => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Check a user-entered endpoint. Returns the trimmed URL.
pub fn validate_endpoint(url: &str) -> Result<&str, SessionError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SessionError::EmptyUrl);
    }
    if !url.starts_with("wss://") && !url.starts_with("ws://") {
        return Err(SessionError::InvalidScheme);
    }
    Ok(url)
}

struct ActiveConnection {
    id: ConnectionId,
    handle: Box<dyn ConnectionHandle>,
}

/// Owns the connection and heartbeat for one UI session.
pub struct ChatSession {
    connector: Arc<dyn Connector>,
    store: Arc<dyn EndpointStore>,
    lifecycle: Lifecycle,
    connection: Option<ActiveConnection>,
    last_id: ConnectionId,
    heartbeat: Heartbeat,
    signal_tx: mpsc::UnboundedSender<SessionSignal>,
    updates_tx: broadcast::Sender<SessionUpdate>,
}

impl ChatSession {
    /// Create a session and the receiver its signals arrive on.
    ///
    /// The caller must poll the receiver and pass every signal to
    /// [`ChatSession::dispatch`].
    pub fn new(
        connector: Arc<dyn Connector>,
        store: Arc<dyn EndpointStore>,
        heartbeat_period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SessionSignal>) {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (updates_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

        let session = Self {
            connector,
            store,
            lifecycle: Lifecycle::Idle,
            connection: None,
            last_id: 0,
            heartbeat: Heartbeat::new(heartbeat_period),
            signal_tx,
            updates_tx,
        };
        (session, signal_rx)
    }

    /// Subscribe to lifecycle changes, received messages and notices.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.updates_tx.subscribe()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The persisted endpoint (or the default) to pre-fill the URL field.
    pub fn saved_endpoint(&self) -> String {
        self.store.load()
    }

    pub fn heartbeat_running(&self) -> bool {
        self.heartbeat.is_running()
    }

    /// Id of the current connection, if any.
    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.connection.as_ref().map(|c| c.id)
    }

    /// Validate `url`, persist it and start connecting.
    ///
    /// Rejected while another connection is connecting, open or closing.
    pub fn connect(&mut self, url: &str) -> Result<ConnectionId, SessionError> {
        let result = self.try_connect(url);
        if let Err(ref e) = result {
            self.notify(Notice::new(e.to_string(), e.severity()));
        }
        result
    }

    fn try_connect(&mut self, url: &str) -> Result<ConnectionId, SessionError> {
        if self.lifecycle.is_active() {
            return Err(SessionError::AlreadyActive);
        }
        let url = validate_endpoint(url)?;

        if let Err(e) = self.store.save(url) {
            warn!("Failed to persist endpoint {}: {}", url, e);
        }

        self.last_id += 1;
        let id = self.last_id;
        info!("Connecting to: {} (connection {})", url, id);

        let handle = self
            .connector
            .open(url, EventSink::new(id, self.signal_tx.clone()));
        self.connection = Some(ActiveConnection { id, handle });
        self.set_lifecycle(Lifecycle::Connecting);
        Ok(id)
    }

    /// Request graceful closure. The session stays `Closing` until the
    /// transport reports `Closed`.
    pub fn disconnect(&mut self) {
        if !matches!(self.lifecycle, Lifecycle::Connecting | Lifecycle::Open) {
            return;
        }
        if let Some(conn) = &self.connection {
            info!("Disconnecting connection {}...", conn.id);
            conn.handle.close(NORMAL_CLOSURE, CLOSE_REASON_USER);
            self.set_lifecycle(Lifecycle::Closing);
        }
    }

    /// Send a chat message. On `Ok` the caller clears its input field.
    pub fn send_message(&mut self, text: &str) -> Result<(), SessionError> {
        let result = self.try_send_message(text);
        if let Err(ref e) = result {
            self.notify(Notice::new(e.to_string(), e.severity()));
        }
        result
    }

    fn try_send_message(&mut self, text: &str) -> Result<(), SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let conn = match (&self.connection, self.lifecycle) {
            (Some(conn), Lifecycle::Open) => conn,
            _ => return Err(SessionError::NotConnected),
        };

        let frame = OutgoingAction::send_message(text)
            .to_frame()
            .map_err(|e| {
                error!("Failed to serialize message: {}", e);
                SessionError::SendFailed
            })?;

        conn.handle.send_text(frame).map_err(|e| {
            error!("Error sending message: {}", e);
            SessionError::SendFailed
        })?;

        info!("Message sent ({} chars)", text.chars().count());
        Ok(())
    }

    /// Process one signal from the dispatch queue.
    ///
    /// Signals from connections other than the current one are dropped.
    pub fn dispatch(&mut self, signal: SessionSignal) {
        match signal {
            SessionSignal::Transport { id, event } => {
                if self.connection_id() != Some(id) {
                    debug!("Ignoring {:?} from stale connection {}", event, id);
                    return;
                }
                match event {
                    TransportEvent::Opened => self.on_open(),
                    TransportEvent::Message(raw) => self.on_message(&raw),
                    TransportEvent::Error(detail) => self.on_error(&detail),
                    TransportEvent::Closed { code, reason } => self.on_close(code, &reason),
                }
            }
            SessionSignal::HeartbeatTick { id } => {
                if self.connection_id() == Some(id) {
                    self.on_heartbeat();
                }
            }
        }
    }

    /// Close any connection and stop the heartbeat. Used on quit.
    pub fn shutdown(&mut self) {
        self.disconnect();
        self.heartbeat.stop();
    }

    fn on_open(&mut self) {
        if self.lifecycle != Lifecycle::Connecting {
            debug!("Ignoring open while {:?}", self.lifecycle);
            return;
        }
        info!("Connected to WebSocket");
        self.set_lifecycle(Lifecycle::Open);
        self.notify(Notice::success(NOTICE_CONNECTED));

        if let Some(id) = self.connection_id() {
            self.heartbeat.start(id, self.signal_tx.clone());
        }
    }

    fn on_message(&mut self, raw: &str) {
        debug!("Message received: {}", raw);
        match InboundFrame::parse(raw) {
            InboundFrame::Chat(message) => self.publish(SessionUpdate::MessageReceived(message)),
            InboundFrame::ServerError(error) => {
                self.notify(Notice::error(format!("Error: {}", error)))
            }
            InboundFrame::PlainText(text) => self.notify(Notice::info(text)),
        }
    }

    fn on_error(&mut self, detail: &str) {
        error!("WebSocket error: {}", detail);
        self.notify(Notice::error(NOTICE_CONNECTION_ERROR));
    }

    fn on_close(&mut self, code: u16, reason: &str) {
        info!("Disconnected from WebSocket ({} {})", code, reason);
        self.heartbeat.stop();
        self.connection = None;
        self.set_lifecycle(Lifecycle::Idle);

        let reason = if reason.is_empty() {
            FALLBACK_CLOSE_REASON
        } else {
            reason
        };
        self.notify(Notice::warning(format!("Disconnected: {}", reason)));
    }

    fn on_heartbeat(&mut self) {
        if !self.lifecycle.is_open() {
            return;
        }
        let Some(conn) = &self.connection else {
            return;
        };

        let frame = match OutgoingAction::Ping.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Heartbeat failed: {}", e);
                return;
            }
        };
        match conn.handle.send_text(frame) {
            Ok(()) => debug!("Heartbeat sent"),
            Err(e) => warn!("Heartbeat failed: {}", e),
        }
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        if self.lifecycle == lifecycle {
            return;
        }
        debug!("Lifecycle {:?} -> {:?}", self.lifecycle, lifecycle);
        self.lifecycle = lifecycle;
        self.publish(SessionUpdate::LifecycleChanged(lifecycle));
    }

    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Error => warn!("[ERROR] {}", notice.text),
            Severity::Warning => warn!("[WARNING] {}", notice.text),
            Severity::Info | Severity::Success => {
                info!("[{}] {}", notice.severity.as_str().to_uppercase(), notice.text)
            }
        }
        self.publish(SessionUpdate::Notice(notice));
    }

    fn publish(&self, update: SessionUpdate) {
        // No subscribers is not an error
        let _ = self.updates_tx.send(update);
    }
}
