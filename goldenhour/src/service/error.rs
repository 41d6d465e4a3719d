//! Service-level error type.

use thiserror::Error;

use crate::api::ApiError;
use crate::session::SessionError;

/// Errors surfaced by the dispatch service facade.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Backend API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session persistence failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// An operation needed an active emergency but none is stored
    #[error("No active emergency session; submit an emergency first")]
    NoActiveSession,
}
