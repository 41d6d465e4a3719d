//! Dependent data refreshers
//!
//! Two unconditional polling loops that run alongside the status poller for
//! the lifetime of an emergency: ambulance position (5 s cadence) and the
//! candidate hospital list (30 s cadence). Neither cares about assignment
//! state; both publish their latest successful fetch through a `watch`
//! channel, so a transient failure leaves the previous value visible until
//! the next success overwrites it. They run until cancelled.

mod ambulance;
mod config;
mod hospitals;

pub use ambulance::AmbulanceRefresher;
pub use config::{RefreshConfig, DEFAULT_AMBULANCE_INTERVAL, DEFAULT_HOSPITAL_LIST_INTERVAL};
pub use hospitals::{sort_by_distance, HospitalListRefresher};
