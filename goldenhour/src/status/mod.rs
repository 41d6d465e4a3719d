//! Emergency status polling module
//!
//! The [`StatusPoller`] is a poll-loop daemon over a single emergency: it
//! repeatedly fetches `/status/{id}`, fans successive snapshots out to the
//! consumer, and stops on its own once the backend reports a hospital
//! assignment. The terminal fetch is enriched with hospital detail by the
//! resolver before it is emitted.
//!
//! # Lifecycle
//!
//! ```text
//! INACTIVE --(emergency id)--> POLLING --(assigned)--> RESOLVED
//! ```
//!
//! `POLLING -> POLLING` ticks are driven by [`next_poll`], an explicit
//! transition function over the latest fetched status. There is no way back
//! from `RESOLVED`; a new emergency id means a new poller.

mod config;
mod poller;
mod resolver;

pub use config::{
    StatusPollerConfig, DEFAULT_POLL_INTERVAL, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY,
};
pub use poller::{next_poll, AssignedCallback, PollDecision, StatusEvent, StatusPoller};
pub use resolver::resolve_hospital;
