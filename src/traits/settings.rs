//! Endpoint settings trait abstraction.
//!
//! Abstracts the durable storage of the last-used endpoint URL so the
//! session can persist it without touching the file system in tests.

/// Settings storage errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The data directory could not be determined
    #[error("Failed to determine settings directory")]
    NoDataDir,
    /// Reading or writing the settings file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The settings could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Test doubles configured to fail
    #[error("Settings error: {0}")]
    Other(String),
}

/// Durable storage for the endpoint URL.
pub trait EndpointStore: Send + Sync {
    /// The previously saved endpoint, or the built-in default if none was saved.
    fn load(&self) -> String;

    /// Overwrite the saved endpoint.
    fn save(&self, url: &str) -> Result<(), SettingsError>;
}
