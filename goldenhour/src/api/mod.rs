//! Dispatch backend API module
//!
//! Defines the wire data model for the dispatch backend's REST endpoints,
//! the [`DispatchApi`] trait that the polling daemons are written against,
//! and the [`HttpDispatchApi`] implementation backed by `reqwest`.
//!
//! The trait exists for dependency injection: tests drive the daemons with
//! scripted mock clients instead of a live backend.

mod client;
mod error;
mod types;

pub use client::{DispatchApi, HttpDispatchApi, DEFAULT_HTTP_TIMEOUT};
pub use error::ApiError;
pub use types::{
    AmbulanceLocation, EmergencyPhase, EmergencyStatus, HospitalListResponse, HospitalSummary,
    NotifyReceipt, NotifyRequest, TriageRequest, TriageResponse, Vitals,
};
