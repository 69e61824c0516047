//! Persistent endpoint settings.
//!
//! The last endpoint the user connected to is stored as a single value in
//! `<data dir>/settings.json`:
//!
//! ```json
//! { "websocketUrl": "wss://chat.example.com/production" }
//! ```
//!
//! There is no versioning and no migration. A missing, unreadable or empty
//! value falls back to [`DEFAULT_ENDPOINT`].

use serde::{Deserialize, Serialize};

/// Endpoint used when nothing has been saved yet.
pub const DEFAULT_ENDPOINT: &str =
    "wss://0k6ooykme9.execute-api.ap-south-1.amazonaws.com/production";

/// The settings file name inside the data directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// On-disk shape of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(rename = "websocketUrl", default, skip_serializing_if = "Option::is_none")]
    pub websocket_url: Option<String>,
}

impl StoredSettings {
    pub fn with_endpoint(url: &str) -> Self {
        Self {
            websocket_url: Some(url.to_string()),
        }
    }

    /// The saved endpoint, or the default when absent or empty.
    pub fn endpoint_or_default(&self) -> String {
        match self.websocket_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => DEFAULT_ENDPOINT.to_string(),
        }
    }
}
