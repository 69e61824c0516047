//! File-based endpoint store adapter.
//!
//! Stores the endpoint URL in `<data dir>/settings.json`, by default
//! `~/.parley/settings.json`.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::settings::{StoredSettings, SETTINGS_FILE};
use crate::traits::{EndpointStore, SettingsError};

/// File-based endpoint store.
#[derive(Debug, Clone)]
pub struct FileEndpointStore {
    settings_path: PathBuf,
}

impl FileEndpointStore {
    /// Create a store rooted at `data_dir`. Nothing is touched until `save`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            settings_path: data_dir.join(SETTINGS_FILE),
        }
    }

    /// Get the path to the settings file.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    fn read(&self) -> Option<StoredSettings> {
        let file = File::open(&self.settings_path).ok()?;
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(settings) => Some(settings),
            Err(e) => {
                debug!("Ignoring unreadable settings file {:?}: {}", self.settings_path, e);
                None
            }
        }
    }
}

impl EndpointStore for FileEndpointStore {
    fn load(&self) -> String {
        self.read().unwrap_or_default().endpoint_or_default()
    }

    fn save(&self, url: &str) -> Result<(), SettingsError> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.settings_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &StoredSettings::with_endpoint(url))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_ENDPOINT;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEndpointStore::new(temp_dir.path());
        assert_eq!(store.load(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEndpointStore::new(&temp_dir.path().join("nested"));

        store.save("ws://localhost:9999").unwrap();
        assert_eq!(store.load(), "ws://localhost:9999");

        store.save("wss://chat.example.com/prod").unwrap();
        assert_eq!(store.load(), "wss://chat.example.com/prod");
    }

    #[test]
    fn test_corrupt_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEndpointStore::new(temp_dir.path());
        fs::write(store.settings_path(), "{ not json").unwrap();
        assert_eq!(store.load(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_saved_file_uses_fixed_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEndpointStore::new(temp_dir.path());
        store.save("ws://localhost:9999").unwrap();

        let contents = fs::read_to_string(store.settings_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["websocketUrl"], "ws://localhost:9999");
    }

    #[test]
    fn test_settings_path() {
        let store = FileEndpointStore::new(Path::new("/tmp/parley-test"));
        assert!(store.settings_path().ends_with("settings.json"));
    }
}
