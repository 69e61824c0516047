//! Runtime configuration.
//!
//! Built once at startup from the parsed command line and the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::RunOptions;
use crate::session::HEARTBEAT_PERIOD;
use crate::traits::SettingsError;

/// Overrides the data directory.
pub const HOME_ENV: &str = "PARLEY_HOME";

/// Log filter used when `--log-level` is not given.
pub const LOG_ENV: &str = "PARLEY_LOG";

const DATA_DIR_NAME: &str = ".parley";
const LOGS_DIR_NAME: &str = "logs";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Holds `settings.json` and `logs/`
    pub data_dir: PathBuf,
    /// Log filter from the command line, if any
    pub log_level: Option<String>,
    /// Endpoint from the command line, pre-filled instead of the saved one
    pub initial_url: Option<String>,
    pub heartbeat_period: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    /// Resolve configuration for a run.
    pub fn from_options(options: &RunOptions) -> Result<Self, SettingsError> {
        Ok(Self {
            data_dir: resolve_data_dir()?,
            log_level: options.log_level.clone(),
            initial_url: options.url.clone(),
            heartbeat_period: HEARTBEAT_PERIOD,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join(LOGS_DIR_NAME)
    }
}

/// `$PARLEY_HOME` when set and non-empty, otherwise `~/.parley`.
pub fn resolve_data_dir() -> Result<PathBuf, SettingsError> {
    match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => dirs::home_dir()
            .map(|home| home.join(DATA_DIR_NAME))
            .ok_or(SettingsError::NoDataDir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_home_env_overrides_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(HOME_ENV, dir.path());

        let config = Config::from_options(&RunOptions::default()).unwrap();
        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.logs_dir(), dir.path().join("logs"));

        std::env::remove_var(HOME_ENV);
    }

    #[test]
    #[serial]
    fn test_default_data_dir_is_under_home() {
        std::env::remove_var(HOME_ENV);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolve_data_dir().unwrap(), home.join(".parley"));
        }
    }

    #[test]
    #[serial]
    fn test_options_flow_into_config() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(HOME_ENV, dir.path());

        let options = RunOptions {
            url: Some("ws://localhost:9999".to_string()),
            log_level: Some("debug".to_string()),
        };
        let config = Config::from_options(&options).unwrap();
        assert_eq!(config.initial_url.as_deref(), Some("ws://localhost:9999"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.heartbeat_period, Duration::from_secs(300));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));

        std::env::remove_var(HOME_ENV);
    }
}
