//! In-memory endpoint store for testing.

use std::sync::{Arc, Mutex};

use crate::settings::DEFAULT_ENDPOINT;
use crate::traits::{EndpointStore, SettingsError};

/// In-memory endpoint store for testing.
///
/// Clones share the same storage, so a test can keep one clone while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEndpointStore {
    endpoint: Arc<Mutex<Option<String>>>,
    save_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryEndpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a previously saved endpoint.
    pub fn with_endpoint(url: &str) -> Self {
        let store = Self::default();
        if let Ok(mut endpoint) = store.endpoint.lock() {
            *endpoint = Some(url.to_string());
        }
        store
    }

    /// The raw saved value, `None` if nothing was ever saved.
    pub fn saved(&self) -> Option<String> {
        self.endpoint.lock().ok().and_then(|e| e.clone())
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        if let Ok(mut flag) = self.save_should_fail.lock() {
            *flag = should_fail;
        }
    }
}

impl EndpointStore for InMemoryEndpointStore {
    fn load(&self) -> String {
        match self.saved() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_ENDPOINT.to_string(),
        }
    }

    fn save(&self, url: &str) -> Result<(), SettingsError> {
        if self.save_should_fail.lock().map(|f| *f).unwrap_or(false) {
            return Err(SettingsError::Other("mock save failure".to_string()));
        }
        let mut endpoint = self
            .endpoint
            .lock()
            .map_err(|e| SettingsError::Other(e.to_string()))?;
        *endpoint = Some(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_defaults() {
        let store = InMemoryEndpointStore::new();
        assert_eq!(store.load(), DEFAULT_ENDPOINT);
        assert!(store.saved().is_none());
    }

    #[test]
    fn test_in_memory_store_shared_between_clones() {
        let store = InMemoryEndpointStore::new();
        let clone = store.clone();
        clone.save("ws://localhost:9999").unwrap();
        assert_eq!(store.load(), "ws://localhost:9999");
    }

    #[test]
    fn test_in_memory_store_save_failure() {
        let store = InMemoryEndpointStore::with_endpoint("ws://old");
        store.set_save_should_fail(true);
        assert!(store.save("ws://new").is_err());
        assert_eq!(store.load(), "ws://old");
    }
}
