//! Tungstenite-based transport adapter.
//!
//! This module implements the [`Connector`] and [`ConnectionHandle`] traits
//! on top of [`WsClient`].

use crate::traits::{ConnectionHandle, Connector, EventSink};
use crate::websocket::{WsClient, WsClientConfig, WsError};

/// Connector that opens real WebSocket connections.
///
/// # Example
///
/// ```ignore
/// use parley::adapters::TungsteniteConnector;
/// use parley::traits::{Connector, EventSink};
///
/// let connector = TungsteniteConnector::default();
/// let handle = connector.open("wss://chat.example.com/prod", EventSink::new(1, tx));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TungsteniteConnector {
    config: WsClientConfig,
}

impl TungsteniteConnector {
    pub fn new(config: WsClientConfig) -> Self {
        Self { config }
    }
}

impl Connector for TungsteniteConnector {
    fn open(&self, url: &str, sink: EventSink) -> Box<dyn ConnectionHandle> {
        Box::new(WsClient::spawn(url, self.config.clone(), sink))
    }
}

impl ConnectionHandle for WsClient {
    fn send_text(&self, text: String) -> Result<(), WsError> {
        WsClient::send_text(self, text)
    }

    fn close(&self, code: u16, reason: &str) {
        WsClient::close(self, code, reason)
    }
}
