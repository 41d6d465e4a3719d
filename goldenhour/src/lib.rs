//! GoldenHour - emergency dispatch client
//!
//! This library implements the client side of an emergency-dispatch system:
//! a triage submission, a status poll loop that stops once a hospital is
//! assigned, independent refreshers for the hospital list and ambulance
//! position, and the great-circle distance math used to rank hospitals.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use goldenhour::config::Settings;
//! use goldenhour::service::DispatchService;
//! use goldenhour::status::StatusEvent;
//!
//! let service = DispatchService::from_settings(Settings::from_env())?;
//!
//! // Submit the intake form; the emergency id is persisted for resume
//! let triage = service.submit(&request).await?;
//!
//! // Watch the emergency until a hospital is assigned
//! let mut handle = service.watch(goldenhour::session::Session::new(&triage.emergency_id));
//! while let Some(event) = handle.events.recv().await {
//!     if let StatusEvent::Assigned(status) = event {
//!         println!("Assigned: {:?}", status.hospital);
//!     }
//! }
//! handle.shutdown().await;
//! ```

pub mod api;
pub mod config;
pub mod geo;
pub mod logging;
pub mod refresh;
pub mod service;
pub mod session;
pub mod status;

/// Version of the GoldenHour library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
