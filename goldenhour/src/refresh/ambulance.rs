//! Ambulance position refresher - fixed-cadence poll loop daemon.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::{AmbulanceLocation, DispatchApi};

/// Refreshes the ambulance position for an emergency on a fixed cadence.
///
/// Publishes the latest successful fix through a `watch` channel. Fetch
/// failures are transient: the previous fix stays visible until the next
/// success. There is no retry limit; the loop runs until cancelled or until
/// every receiver is gone.
pub struct AmbulanceRefresher<C: DispatchApi> {
    api: Arc<C>,
    emergency_id: String,
    location_tx: watch::Sender<Option<AmbulanceLocation>>,
    interval: Duration,
}

impl<C: DispatchApi + 'static> AmbulanceRefresher<C> {
    /// Create a refresher and the receiver for its published fixes.
    pub fn new(
        api: Arc<C>,
        emergency_id: impl Into<String>,
        interval: Duration,
    ) -> (Self, watch::Receiver<Option<AmbulanceLocation>>) {
        let (location_tx, location_rx) = watch::channel(None);
        (
            Self {
                api,
                emergency_id: emergency_id.into(),
                location_tx,
                interval,
            },
            location_rx,
        )
    }

    /// Start the refresher as an async task.
    pub fn start(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run(cancel).await;
        })
    }

    /// Run the refresh loop.
    pub async fn run(self, cancel: CancellationToken) {
        info!(
            emergency_id = %self.emergency_id,
            interval_secs = self.interval.as_secs(),
            "Ambulance refresher started"
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {}
            }

            if self.location_tx.is_closed() {
                debug!("Ambulance watch channel closed, stopping");
                break;
            }

            match self.api.fetch_ambulance(&self.emergency_id).await {
                Ok(fix) => {
                    self.location_tx.send_replace(Some(fix));
                }
                Err(e) => {
                    // Transient: keep the previous fix visible
                    debug!(
                        emergency_id = %self.emergency_id,
                        error = %e,
                        "Ambulance fetch failed, keeping last known position"
                    );
                }
            }
        }

        info!(emergency_id = %self.emergency_id, "Ambulance refresher stopped");
    }
}
