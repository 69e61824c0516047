use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use crate::traits::{EventSink, TransportEvent};

/// Standard "normal closure" status code
pub const NORMAL_CLOSURE: u16 = 1000;
/// Reported when the server closed without a status code
pub const NO_STATUS_RECEIVED: u16 = 1005;
/// Reported when the connection dropped without a close handshake
pub const ABNORMAL_CLOSURE: u16 = 1006;

/// WebSocket connection errors
#[derive(Debug, Clone)]
pub enum WsError {
    ConnectionFailed(String),
    Disconnected,
    SendFailed(String),
}

impl std::fmt::Display for WsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WsError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            WsError::Disconnected => write!(f, "Disconnected from server"),
            WsError::SendFailed(msg) => write!(f, "Send failed: {}", msg),
        }
    }
}

impl std::error::Error for WsError {}

/// Configuration for WebSocket client
#[derive(Debug, Clone)]
pub struct WsClientConfig {
    /// Upper bound on the opening handshake
    pub connect_timeout: Duration,
    /// How long to wait for the server to answer our close frame
    pub close_timeout: Duration,
}

impl Default for WsClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            close_timeout: Duration::from_secs(5),
        }
    }
}

impl WsClientConfig {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_close_timeout(mut self, timeout: Duration) -> Self {
        self.close_timeout = timeout;
        self
    }
}

/// Commands from the handle to the connection task
#[derive(Debug)]
enum Outbound {
    Text(String),
    Close { code: u16, reason: String },
}

/// Handle to one WebSocket connection running in a background task.
///
/// Dropping the handle closes the connection normally.
pub struct WsClient {
    outbound_tx: mpsc::UnboundedSender<Outbound>,
    open: Arc<AtomicBool>,
}

impl WsClient {
    /// Start connecting to `url` in the background.
    ///
    /// Returns immediately; the outcome is reported through `sink`.
    /// Must be called from within a tokio runtime.
    pub fn spawn(url: &str, config: WsClientConfig, sink: EventSink) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let open = Arc::new(AtomicBool::new(false));

        tokio::spawn(run_connection(
            url.to_string(),
            config,
            outbound_rx,
            open.clone(),
            sink,
        ));

        Self { outbound_tx, open }
    }

    /// Check if the handshake completed and no close has been requested or received
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Queue a text frame
    pub fn send_text(&self, text: String) -> Result<(), WsError> {
        if !self.is_open() {
            return Err(WsError::Disconnected);
        }
        self.outbound_tx
            .send(Outbound::Text(text))
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }

    /// Request a graceful close
    pub fn close(&self, code: u16, reason: &str) {
        let _ = self.outbound_tx.send(Outbound::Close {
            code,
            reason: reason.to_string(),
        });
    }
}

/// Drive one connection from handshake to close, reporting through `sink`.
async fn run_connection(
    url: String,
    config: WsClientConfig,
    mut outbound_rx: mpsc::UnboundedReceiver<Outbound>,
    open: Arc<AtomicBool>,
    sink: EventSink,
) {
    info!("Connecting to {} (connection {})", url, sink.id());

    let handshake = tokio::time::timeout(config.connect_timeout, connect_async(url.as_str()));
    tokio::pin!(handshake);

    let ws_stream = loop {
        tokio::select! {
            result = &mut handshake => {
                match result {
                    Ok(Ok((stream, _response))) => break stream,
                    Ok(Err(e)) => {
                        let err = WsError::ConnectionFailed(e.to_string());
                        warn!("{}", err);
                        sink.emit(TransportEvent::Error(err.to_string()));
                    }
                    Err(_) => {
                        let err = WsError::ConnectionFailed(format!(
                            "handshake timed out after {}s",
                            config.connect_timeout.as_secs()
                        ));
                        warn!("{}", err);
                        sink.emit(TransportEvent::Error(err.to_string()));
                    }
                }
                sink.emit(TransportEvent::Closed {
                    code: ABNORMAL_CLOSURE,
                    reason: String::new(),
                });
                return;
            }
            cmd = outbound_rx.recv() => {
                match cmd {
                    Some(Outbound::Text(_)) => {
                        debug!("Dropping frame queued before the connection opened");
                    }
                    Some(Outbound::Close { .. }) | None => {
                        info!("Connection attempt to {} aborted", url);
                        sink.emit(TransportEvent::Closed {
                            code: ABNORMAL_CLOSURE,
                            reason: String::new(),
                        });
                        return;
                    }
                }
            }
        }
    };

    info!("Connected to WebSocket server at {}", url);
    open.store(true, Ordering::SeqCst);
    sink.emit(TransportEvent::Opened);

    let (mut ws_sink, mut ws_stream) = ws_stream.split();
    let mut requested: Option<(u16, String)> = None;
    let mut handle_dropped = false;

    // Armed once we send a close frame; fires if the server never answers
    let close_deadline = tokio::time::sleep(config.close_timeout);
    tokio::pin!(close_deadline);

    let (code, reason) = loop {
        tokio::select! {
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!("Received frame: {}", text);
                        sink.emit(TransportEvent::Message(text));
                    }
                    Some(Ok(Message::Binary(data))) => {
                        debug!("Received binary frame ({} bytes)", data.len());
                        sink.emit(TransportEvent::Message(
                            String::from_utf8_lossy(&data).into_owned(),
                        ));
                    }
                    Some(Ok(Message::Ping(data))) => {
                        debug!("Received ping, sending pong");
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!("Received close frame from server");
                        let (mut code, mut reason) = match frame {
                            Some(frame) => (u16::from(frame.code), frame.reason.into_owned()),
                            None => (NO_STATUS_RECEIVED, String::new()),
                        };
                        if reason.is_empty() {
                            if let Some((requested_code, requested_reason)) = requested.take() {
                                reason = requested_reason;
                                if code == NO_STATUS_RECEIVED {
                                    code = requested_code;
                                }
                            }
                        }
                        let _ = ws_sink.flush().await;
                        break (code, reason);
                    }
                    Some(Ok(_)) => {
                        // Pong and raw frames carry nothing for the session
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        sink.emit(TransportEvent::Error(e.to_string()));
                        break (ABNORMAL_CLOSURE, String::new());
                    }
                    None => {
                        info!("WebSocket stream ended");
                        break (ABNORMAL_CLOSURE, String::new());
                    }
                }
            }
            cmd = outbound_rx.recv(), if !handle_dropped => {
                match cmd {
                    Some(Outbound::Text(text)) => {
                        debug!("Sending frame: {}", text);
                        if let Err(e) = ws_sink.send(Message::Text(text)).await {
                            error!("Failed to send frame: {}", e);
                        }
                    }
                    Some(Outbound::Close { code, reason }) => {
                        info!("Closing connection: {} {}", code, reason);
                        open.store(false, Ordering::SeqCst);
                        let frame = CloseFrame {
                            code: CloseCode::from(code),
                            reason: reason.clone().into(),
                        };
                        requested = Some((code, reason));
                        close_deadline
                            .as_mut()
                            .reset(tokio::time::Instant::now() + config.close_timeout);
                        if let Err(e) = ws_sink.send(Message::Close(Some(frame))).await {
                            warn!("Failed to send close frame: {}", e);
                        }
                    }
                    None => {
                        debug!("Connection handle dropped, closing");
                        handle_dropped = true;
                        open.store(false, Ordering::SeqCst);
                        close_deadline
                            .as_mut()
                            .reset(tokio::time::Instant::now() + config.close_timeout);
                        let _ = ws_sink.send(Message::Close(None)).await;
                    }
                }
            }
            () = &mut close_deadline, if requested.is_some() || handle_dropped => {
                warn!(
                    "No close reply from {} within {:?}, dropping connection",
                    url, config.close_timeout
                );
                break requested
                    .take()
                    .unwrap_or((ABNORMAL_CLOSURE, String::new()));
            }
        }
    };

    open.store(false, Ordering::SeqCst);
    let _ = tokio::time::timeout(config.close_timeout, ws_sink.close()).await;
    info!("Connection to {} closed ({} {})", url, code, reason);
    sink.emit(TransportEvent::Closed { code, reason });
}
