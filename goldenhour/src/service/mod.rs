//! High-level dispatch service facade.
//!
//! [`DispatchService`] wires the API client, session store, and polling
//! daemons together behind a small API: `submit` an emergency, `watch` it
//! (status poller plus both refreshers, bundled into a [`WatchHandle`]),
//! `notify` the chosen hospital, and `resume` a persisted session.

mod error;
mod facade;

pub use error::ServiceError;
pub use facade::{DispatchService, WatchHandle};
