//! Default values and environment variable names for all settings.

/// Backend base URL used when none is configured (local dev backend).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Backend base URL.
pub const ENV_BACKEND_URL: &str = "GOLDENHOUR_BACKEND_URL";

/// HTTP request timeout override, in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "GOLDENHOUR_HTTP_TIMEOUT_SECS";

/// Status poll interval override, in seconds.
pub const ENV_STATUS_POLL_INTERVAL_SECS: &str = "GOLDENHOUR_STATUS_POLL_INTERVAL_SECS";

/// Ambulance refresh interval override, in seconds.
pub const ENV_AMBULANCE_INTERVAL_SECS: &str = "GOLDENHOUR_AMBULANCE_INTERVAL_SECS";

/// Hospital list refresh interval override, in seconds.
pub const ENV_HOSPITAL_LIST_INTERVAL_SECS: &str = "GOLDENHOUR_HOSPITAL_LIST_INTERVAL_SECS";

/// State directory override (session file location).
pub const ENV_STATE_DIR: &str = "GOLDENHOUR_STATE_DIR";
