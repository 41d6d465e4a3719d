//! Dispatch service facade and watch handle.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::api::{
    AmbulanceLocation, DispatchApi, HospitalSummary, HttpDispatchApi, NotifyReceipt,
    NotifyRequest, TriageRequest, TriageResponse,
};
use crate::config::Settings;
use crate::refresh::{AmbulanceRefresher, HospitalListRefresher};
use crate::session::{Session, SessionStore};
use crate::status::{AssignedCallback, StatusEvent, StatusPoller};

use super::error::ServiceError;

/// Capacity of the status event channel handed to consumers.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// High-level dispatch client.
///
/// Owns a shared API client and the session store; spawns the per-emergency
/// polling daemons on demand.
pub struct DispatchService<C: DispatchApi> {
    api: Arc<C>,
    store: SessionStore,
    settings: Settings,
}

impl DispatchService<HttpDispatchApi> {
    /// Create a service talking to the backend configured in `settings`.
    pub fn from_settings(settings: Settings) -> Result<Self, ServiceError> {
        let api = HttpDispatchApi::with_timeout(
            settings.backend.base_url.clone(),
            settings.backend.timeout,
        )?;
        Ok(Self::with_api(Arc::new(api), settings))
    }
}

impl<C: DispatchApi + 'static> DispatchService<C> {
    /// Create a service over an existing API client.
    ///
    /// This is the injection point for mock clients in tests.
    pub fn with_api(api: Arc<C>, settings: Settings) -> Self {
        let store = SessionStore::new(&settings.state_dir);
        Self {
            api,
            store,
            settings,
        }
    }

    /// The shared API client.
    pub fn api(&self) -> Arc<C> {
        Arc::clone(&self.api)
    }

    /// Submit an emergency to the triage endpoint and persist the returned
    /// emergency id as the active session.
    pub async fn submit(&self, request: &TriageRequest) -> Result<TriageResponse, ServiceError> {
        let response = self.api.submit_triage(request).await?;

        self.store.save(&Session::new(&response.emergency_id))?;
        info!(
            emergency_id = %response.emergency_id,
            severity = response.severity.as_deref(),
            "Emergency submitted"
        );

        Ok(response)
    }

    /// Load the persisted session, if any.
    pub fn resume(&self) -> Result<Option<Session>, ServiceError> {
        Ok(self.store.load()?)
    }

    /// Forget the persisted session.
    pub fn clear_session(&self) -> Result<(), ServiceError> {
        Ok(self.store.clear()?)
    }

    /// Notify a hospital about the given emergency.
    pub async fn notify(
        &self,
        session: &Session,
        hospital_id: &str,
    ) -> Result<NotifyReceipt, ServiceError> {
        let receipt = self
            .api
            .notify_hospital(&NotifyRequest {
                hospital_id: hospital_id.to_string(),
                emergency_id: session.emergency_id.clone(),
            })
            .await?;

        info!(
            emergency_id = %session.emergency_id,
            hospital_id,
            "Hospital notified"
        );
        Ok(receipt)
    }

    /// Start watching an emergency: spawns the status poller and both
    /// refreshers, all tied to one cancellation token.
    pub fn watch(&self, session: Session) -> WatchHandle {
        self.watch_with(session, None)
    }

    /// Like [`DispatchService::watch`], with a callback invoked once on the
    /// first observed hospital assignment.
    pub fn watch_with(
        &self,
        session: Session,
        on_assigned: Option<AssignedCallback>,
    ) -> WatchHandle {
        let cancel = CancellationToken::new();
        let (event_tx, events) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let mut poller = StatusPoller::new(
            Arc::clone(&self.api),
            session.emergency_id.clone(),
            event_tx,
            self.settings.polling.status.clone(),
        );
        if let Some(callback) = on_assigned {
            poller = poller.with_on_assigned(callback);
        }

        let (ambulance_refresher, ambulance) = AmbulanceRefresher::new(
            Arc::clone(&self.api),
            session.emergency_id.clone(),
            self.settings.polling.refresh.ambulance_interval,
        );
        let (hospital_refresher, hospitals) = HospitalListRefresher::new(
            Arc::clone(&self.api),
            session.emergency_id.clone(),
            self.settings.polling.refresh.hospital_list_interval,
        );

        let tasks = vec![
            poller.start(cancel.child_token()),
            ambulance_refresher.start(cancel.child_token()),
            hospital_refresher.start(cancel.child_token()),
        ];

        info!(emergency_id = %session.emergency_id, "Watching emergency");

        WatchHandle {
            events,
            ambulance,
            hospitals,
            cancel,
            tasks,
        }
    }
}

/// Handle to one emergency's running polling loops.
///
/// Dropping the handle (or its receivers) alone does not stop the loops
/// promptly; call [`WatchHandle::shutdown`] to cancel and join them.
pub struct WatchHandle {
    /// Status events from the poller; ends after the terminal event.
    pub events: mpsc::Receiver<StatusEvent>,

    /// Latest ambulance fix, `None` until the first successful fetch.
    pub ambulance: watch::Receiver<Option<AmbulanceLocation>>,

    /// Latest hospital list sorted by distance, `None` until the first
    /// successful fetch.
    pub hospitals: watch::Receiver<Option<Vec<HospitalSummary>>>,

    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl WatchHandle {
    /// Token that fires when the watch is shut down; loops spawned elsewhere
    /// can tie their lifetime to it.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel all loops and wait for them to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();

        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                error!(error = %e, "Polling task panicked during shutdown");
            }
        }
    }
}
