//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and a
//! handler.
//!
//! - [`submit`] - Submit an emergency and watch it
//! - [`watch`] - Watch an emergency's dispatch progress
//! - [`notify`] - Notify a hospital about the active emergency

pub mod notify;
pub mod submit;
pub mod watch;

use goldenhour::api::HttpDispatchApi;
use goldenhour::config::Settings;
use goldenhour::service::DispatchService;

use crate::error::CliError;

/// Build the dispatch service from environment configuration.
fn service() -> Result<DispatchService<HttpDispatchApi>, CliError> {
    let settings = Settings::from_env();
    tracing::debug!(backend = %settings.backend.base_url, "Using dispatch backend");
    DispatchService::from_settings(settings).map_err(CliError::from)
}
