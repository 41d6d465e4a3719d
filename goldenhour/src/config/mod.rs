//! Application configuration.
//!
//! Settings are grouped per concern and resolved from environment variables
//! with sensible defaults. The only required piece of configuration is the
//! backend base URL; everything else has a default that matches the
//! reference deployment. Malformed values fall back to their defaults with
//! a warning rather than aborting.

mod defaults;
mod settings;

pub use defaults::{
    DEFAULT_BACKEND_URL, DEFAULT_HTTP_TIMEOUT_SECS, ENV_AMBULANCE_INTERVAL_SECS, ENV_BACKEND_URL,
    ENV_HOSPITAL_LIST_INTERVAL_SECS, ENV_HTTP_TIMEOUT_SECS, ENV_STATE_DIR,
    ENV_STATUS_POLL_INTERVAL_SECS,
};
pub use settings::{BackendSettings, PollingSettings, Settings};
