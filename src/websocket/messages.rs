use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Outgoing WebSocket messages (sent to server)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action")]
pub enum OutgoingAction {
    /// Broadcast a chat message to everyone in the room
    #[serde(rename = "sendmessage")]
    SendMessage { message: String },
    /// Keep-alive control message
    #[serde(rename = "ping")]
    Ping,
}

impl OutgoingAction {
    pub fn send_message(message: impl Into<String>) -> Self {
        Self::SendMessage {
            message: message.into(),
        }
    }

    /// Serialize into the text frame sent over the wire.
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A chat message broadcast by the server.
///
/// Every field is optional; the sender enforces no schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Sender identifier (servers usually truncate it, e.g. `"AbCdEfGh..."`)
    pub connection_id: Option<String>,
    /// Message text
    pub message: Option<String>,
    /// When the server stamped the message
    pub timestamp: Option<DateTime<Utc>>,
    /// Server-assigned message id
    pub message_id: Option<String>,
    /// Compact JSON dump of the whole payload, shown when `message` is absent
    pub raw: String,
}

impl ChatMessage {
    fn from_object(map: &Map<String, Value>, raw: String) -> Self {
        Self {
            connection_id: map.get("connectionId").and_then(truthy_text),
            message: map.get("message").and_then(truthy_text),
            timestamp: map.get("timestamp").and_then(parse_timestamp),
            message_id: map.get("messageId").and_then(truthy_text),
            raw,
        }
    }

    fn bare(raw: String) -> Self {
        Self {
            connection_id: None,
            message: None,
            timestamp: None,
            message_id: None,
            raw,
        }
    }
}

/// An inbound text frame, classified at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    /// Structured chat message
    Chat(ChatMessage),
    /// Structured payload carrying an `error` field
    ServerError(String),
    /// Payload that is not structured data; shown verbatim
    PlainText(String),
}

impl InboundFrame {
    /// Classify a raw text frame.
    ///
    /// Never fails: anything that does not parse as JSON (and JSON `null`)
    /// is returned as [`InboundFrame::PlainText`].
    pub fn parse(raw: &str) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => return InboundFrame::PlainText(raw.to_string()),
        };

        match value {
            Value::Null => InboundFrame::PlainText(raw.to_string()),
            Value::Object(ref map) => {
                if let Some(error) = map.get("error").and_then(error_text) {
                    return InboundFrame::ServerError(error);
                }
                InboundFrame::Chat(ChatMessage::from_object(map, value.to_string()))
            }
            other => InboundFrame::Chat(ChatMessage::bare(other.to_string())),
        }
    }
}

/// Text of a field that counts as present: non-empty strings and non-zero numbers.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Text of an `error` field that counts as set.
///
/// Besides the text fields' rules, `true` and any array or object count,
/// shown as their compact JSON.
fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        other => truthy_text(other),
    }
}

/// Accepts epoch millis, RFC 3339, or an offset-less ISO-8601 string.
///
/// Offset-less strings are read as UTC, which is what the server writes.
/// A browser `Date` would read the same string as local time.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            if millis == 0 {
                return None;
            }
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            }),
        _ => None,
    }
}
