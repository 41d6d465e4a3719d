//! Status poller - poll loop daemon for a single emergency.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{ApiError, DispatchApi, EmergencyStatus};

use super::config::StatusPollerConfig;
use super::resolver::resolve_hospital;

/// What the poll loop should do after observing a status snapshot.
///
/// This is the explicit `POLLING -> POLLING` / `POLLING -> RESOLVED`
/// transition function, decoupled from any scheduling primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// Keep polling; issue the next fetch after this delay.
    Continue(Duration),
    /// Terminal condition reached; no further automatic polling.
    Stop,
}

/// Decides the next poll action from the latest fetched status.
///
/// Polling stops once the backend indicates assignment, or once hospital
/// detail has already been merged into the payload. Everything else keeps
/// the loop ticking at the fixed interval.
pub fn next_poll(status: &EmergencyStatus, poll_interval: Duration) -> PollDecision {
    if status.is_assigned() || status.hospital.is_some() {
        PollDecision::Stop
    } else {
        PollDecision::Continue(poll_interval)
    }
}

/// Events emitted by the status poller.
#[derive(Debug)]
pub enum StatusEvent {
    /// A non-terminal status snapshot; polling continues.
    Update(EmergencyStatus),
    /// Assignment observed; the payload carries hospital detail when the
    /// resolver could fetch it. This is the final event.
    Assigned(EmergencyStatus),
    /// One tick's fetch failed after exhausting its retries. The poller
    /// keeps ticking; only this tick's data is lost.
    Failed(ApiError),
}

/// Callback invoked once, on first detection of assignment.
pub type AssignedCallback = Box<dyn Fn(&EmergencyStatus) + Send + Sync>;

/// Status poll-loop daemon.
///
/// Periodically fetches the emergency's status and sends [`StatusEvent`]s
/// to the consumer until assignment is observed or the consumer goes away.
pub struct StatusPoller<C: DispatchApi> {
    /// Shared API client, also used by the resolver.
    api: Arc<C>,

    /// Emergency being watched.
    emergency_id: String,

    /// Channel to send status events to the consumer.
    event_tx: mpsc::Sender<StatusEvent>,

    /// Configuration.
    config: StatusPollerConfig,

    /// Invoked on the first observed assignment, before the final event.
    on_assigned: Option<AssignedCallback>,
}

impl<C: DispatchApi + 'static> StatusPoller<C> {
    /// Create a new status poller for an emergency.
    pub fn new(
        api: Arc<C>,
        emergency_id: impl Into<String>,
        event_tx: mpsc::Sender<StatusEvent>,
        config: StatusPollerConfig,
    ) -> Self {
        Self {
            api,
            emergency_id: emergency_id.into(),
            event_tx,
            config,
            on_assigned: None,
        }
    }

    /// Register a callback to run on first detection of assignment.
    pub fn with_on_assigned(mut self, callback: AssignedCallback) -> Self {
        self.on_assigned = Some(callback);
        self
    }

    /// Start the poller as an async task.
    pub fn start(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run(cancel).await;
        })
    }

    /// Run the poll loop until assignment, cancellation, or consumer loss.
    pub async fn run(self, cancel: CancellationToken) {
        info!(
            emergency_id = %self.emergency_id,
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "Status poller started"
        );

        loop {
            let status = match self.fetch_with_retry(&cancel).await {
                Some(Ok(status)) => status,
                Some(Err(e)) => {
                    warn!(
                        emergency_id = %self.emergency_id,
                        error = %e,
                        "Status fetch failed after retries, surfacing to consumer"
                    );
                    if self.event_tx.send(StatusEvent::Failed(e)).await.is_err() {
                        debug!("Status event channel closed, stopping");
                        break;
                    }
                    if !sleep_unless_cancelled(&cancel, self.config.poll_interval).await {
                        break;
                    }
                    continue;
                }
                None => break,
            };

            match next_poll(&status, self.config.poll_interval) {
                PollDecision::Stop => {
                    // Enrich with hospital detail unless the backend already
                    // merged it into the payload.
                    let resolved = if status.hospital.is_none() {
                        resolve_hospital(self.api.as_ref(), status).await
                    } else {
                        status
                    };

                    info!(
                        emergency_id = %self.emergency_id,
                        hospital = resolved.hospital.as_ref().map(|h| h.name.as_str()),
                        "Hospital assigned, stopping status polling"
                    );

                    if let Some(callback) = &self.on_assigned {
                        callback(&resolved);
                    }
                    let _ = self.event_tx.send(StatusEvent::Assigned(resolved)).await;
                    break;
                }
                PollDecision::Continue(delay) => {
                    if self.event_tx.send(StatusEvent::Update(status)).await.is_err() {
                        debug!("Status event channel closed, stopping");
                        break;
                    }
                    if !sleep_unless_cancelled(&cancel, delay).await {
                        break;
                    }
                }
            }
        }

        info!(emergency_id = %self.emergency_id, "Status poller stopped");
    }

    /// Fetch the status, retrying a bounded number of times within this tick.
    ///
    /// Returns `None` when cancelled mid-tick, `Some(Err)` once the tick's
    /// retries are exhausted.
    async fn fetch_with_retry(
        &self,
        cancel: &CancellationToken,
    ) -> Option<Result<EmergencyStatus, ApiError>> {
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return None;
            }

            match self.api.fetch_status(&self.emergency_id).await {
                Ok(status) => return Some(Ok(status)),
                Err(e) => {
                    if attempt >= self.config.retry_attempts {
                        return Some(Err(e));
                    }
                    attempt += 1;
                    debug!(
                        emergency_id = %self.emergency_id,
                        attempt,
                        error = %e,
                        "Status fetch failed, retrying"
                    );
                    if !sleep_unless_cancelled(cancel, self.config.retry_delay).await {
                        return None;
                    }
                }
            }
        }
    }
}

/// Sleep for `delay`, returning `false` if cancellation fired first.
async fn sleep_unless_cancelled(cancel: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
