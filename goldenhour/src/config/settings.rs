//! Settings structs, grouped per concern.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::refresh::RefreshConfig;
use crate::status::StatusPollerConfig;

use super::defaults::*;

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Backend connection settings
    pub backend: BackendSettings,
    /// Polling cadences for the status poller and refreshers
    pub polling: PollingSettings,
    /// Directory for persisted state (the session file)
    pub state_dir: PathBuf,
}

/// Backend connection settings.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Base URL of the dispatch backend
    pub base_url: String,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

/// Polling cadences.
#[derive(Debug, Clone, Default)]
pub struct PollingSettings {
    /// Status poller interval and retry policy
    pub status: StatusPollerConfig,
    /// Refresher cadences
    pub refresh: RefreshConfig,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            polling: PollingSettings::default(),
            state_dir: default_state_dir(std::env::var("HOME").ok()),
        }
    }
}

impl Settings {
    /// Resolve settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from an arbitrary variable lookup.
    ///
    /// Separated from [`Settings::from_env`] so tests can supply variables
    /// without touching process-global state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings {
            backend: BackendSettings::default(),
            polling: PollingSettings::default(),
            state_dir: default_state_dir(lookup("HOME")),
        };

        if let Some(url) = lookup(ENV_BACKEND_URL) {
            settings.backend.base_url = url;
        }
        if let Some(timeout) = parse_secs(ENV_HTTP_TIMEOUT_SECS, lookup(ENV_HTTP_TIMEOUT_SECS)) {
            settings.backend.timeout = timeout;
        }
        if let Some(interval) = parse_secs(
            ENV_STATUS_POLL_INTERVAL_SECS,
            lookup(ENV_STATUS_POLL_INTERVAL_SECS),
        ) {
            settings.polling.status.poll_interval = interval;
        }
        if let Some(interval) = parse_secs(
            ENV_AMBULANCE_INTERVAL_SECS,
            lookup(ENV_AMBULANCE_INTERVAL_SECS),
        ) {
            settings.polling.refresh.ambulance_interval = interval;
        }
        if let Some(interval) = parse_secs(
            ENV_HOSPITAL_LIST_INTERVAL_SECS,
            lookup(ENV_HOSPITAL_LIST_INTERVAL_SECS),
        ) {
            settings.polling.refresh.hospital_list_interval = interval;
        }
        if let Some(dir) = lookup(ENV_STATE_DIR) {
            settings.state_dir = PathBuf::from(dir);
        }

        settings
    }
}

/// Default state directory: `~/.goldenhour`, or the working directory when
/// no home directory is known.
fn default_state_dir(home: Option<String>) -> PathBuf {
    match home {
        Some(home) => PathBuf::from(home).join(".goldenhour"),
        None => PathBuf::from(".goldenhour"),
    }
}

/// Parse a seconds value, falling back to `None` (keep the default) with a
/// warning when the value is not a positive integer.
fn parse_secs(key: &str, value: Option<String>) -> Option<Duration> {
    let value = value?;
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            warn!(key, value, "Ignoring invalid interval setting, using default");
            None
        }
    }
}
