//! Hospital list refresher - fixed-cadence poll loop daemon.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::{DispatchApi, HospitalSummary};

/// Sorts hospitals by ascending distance, in place.
///
/// Safety net for backends that return the list unsorted. Entries with no
/// distance sort after all entries with one; the sort is stable, so original
/// order is preserved among ties and among the missing-distance entries.
pub fn sort_by_distance(hospitals: &mut [HospitalSummary]) {
    hospitals.sort_by(|a, b| match (a.distance, b.distance) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Refreshes the candidate hospital list for an emergency on a fixed cadence.
///
/// Same shape as [`AmbulanceRefresher`](super::AmbulanceRefresher): latest
/// successful fetch published through a `watch` channel, failures transient,
/// no retry limit, runs until cancelled. The list is re-sorted by distance
/// before publishing.
pub struct HospitalListRefresher<C: DispatchApi> {
    api: Arc<C>,
    emergency_id: String,
    hospitals_tx: watch::Sender<Option<Vec<HospitalSummary>>>,
    interval: Duration,
}

impl<C: DispatchApi + 'static> HospitalListRefresher<C> {
    /// Create a refresher and the receiver for its published lists.
    pub fn new(
        api: Arc<C>,
        emergency_id: impl Into<String>,
        interval: Duration,
    ) -> (Self, watch::Receiver<Option<Vec<HospitalSummary>>>) {
        let (hospitals_tx, hospitals_rx) = watch::channel(None);
        (
            Self {
                api,
                emergency_id: emergency_id.into(),
                hospitals_tx,
                interval,
            },
            hospitals_rx,
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
            "Hospital list refresher started"
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {}
            }

            if self.hospitals_tx.is_closed() {
                debug!("Hospital list watch channel closed, stopping");
                break;
            }

            match self.api.fetch_hospitals(&self.emergency_id).await {
                Ok(response) => {
                    let mut hospitals = response.hospitals;
                    sort_by_distance(&mut hospitals);
                    debug!(
                        emergency_id = %self.emergency_id,
                        count = hospitals.len(),
                        "Hospital list updated"
                    );
                    self.hospitals_tx.send_replace(Some(hospitals));
                }
                Err(e) => {
                    // Transient: keep the previous list visible
                    debug!(
                        emergency_id = %self.emergency_id,
                        error = %e,
                        "Hospital list fetch failed, keeping last known list"
                    );
                }
            }
        }

        info!(emergency_id = %self.emergency_id, "Hospital list refresher stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        AmbulanceLocation, ApiError, EmergencyStatus, HospitalListResponse, NotifyReceipt,
        NotifyRequest, TriageRequest, TriageResponse,
    };
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Mutex;

    fn hospital(id: &str, distance: Option<f64>) -> HospitalSummary {
        HospitalSummary {
            id: id.to_string(),
            name: format!("Hospital {}", id),
            address: None,
            location: None,
            distance,
            eta: None,
            beds_available: None,
            specialties: None,
            is_recommended: false,
        }
    }

    #[test]
    fn test_sort_by_distance_ascending() {
        let mut hospitals = vec![
            hospital("c", Some(9.5)),
            hospital("a", Some(2.0)),
            hospital("b", Some(5.2)),
        ];

        sort_by_distance(&mut hospitals);

        let ids: Vec<&str> = hospitals.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_missing_distance_sorts_last_preserving_order() {
        let mut hospitals = vec![
            hospital("x", None),
            hospital("b", Some(5.2)),
            hospital("y", None),
            hospital("a", Some(2.0)),
            hospital("z", None),
        ];

        sort_by_distance(&mut hospitals);

        let ids: Vec<&str> = hospitals.iter().map(|h| h.id.as_str()).collect();
        // All known distances first, then the unknowns in original order
        assert_eq!(ids, ["a", "b", "x", "y", "z"]);
    }

    #[test]
    fn test_sort_empty_list() {
        let mut hospitals: Vec<HospitalSummary> = Vec::new();
        sort_by_distance(&mut hospitals);
        assert!(hospitals.is_empty());
    }

    /// Mock API serving a programmable hospital list.
    struct HospitalApi {
        result: Mutex<Result<Vec<HospitalSummary>, ()>>,
        calls: AtomicUsize,
    }

    impl HospitalApi {
        fn with_list(list: Vec<HospitalSummary>) -> Self {
            Self {
                result: Mutex::new(Ok(list)),
                calls: AtomicUsize::new(0),
            }
        }

        fn set_error(&self) {
            *self.result.lock().unwrap() = Err(());
        }

        fn calls(&self) -> usize {
            self.calls.load(AtomicOrdering::SeqCst)
        }
    }

    impl DispatchApi for HospitalApi {
        async fn submit_triage(&self, _: &TriageRequest) -> Result<TriageResponse, ApiError> {
            unreachable!("not used by refresher")
        }

        async fn fetch_status(&self, _: &str) -> Result<EmergencyStatus, ApiError> {
            unreachable!("not used by refresher")
        }

        async fn fetch_hospitals(&self, id: &str) -> Result<HospitalListResponse, ApiError> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            self.result
                .lock()
                .unwrap()
                .clone()
                .map(|hospitals| HospitalListResponse {
                    emergency_id: Some(id.to_string()),
                    status: None,
                    hospitals,
                })
                .map_err(|_| ApiError::Http("connection refused".to_string()))
        }

        async fn fetch_selected_hospital(&self, _: &str) -> Result<HospitalSummary, ApiError> {
            unreachable!("not used by refresher")
        }

        async fn fetch_ambulance(&self, _: &str) -> Result<AmbulanceLocation, ApiError> {
            unreachable!("not used by refresher")
        }

        async fn notify_hospital(&self, _: &NotifyRequest) -> Result<NotifyReceipt, ApiError> {
            unreachable!("not used by refresher")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_sorted_list() {
        let api = Arc::new(HospitalApi::with_list(vec![
            hospital("far", Some(9.5)),
            hospital("unknown", None),
            hospital("near", Some(2.0)),
        ]));
        let (refresher, mut rx) =
            HospitalListRefresher::new(Arc::clone(&api), "e1", Duration::from_secs(30));
        let cancel = CancellationToken::new();
        let handle = refresher.start(cancel.clone());

        rx.changed().await.unwrap();
        {
            let list = rx.borrow();
            let ids: Vec<&str> = list.as_ref().unwrap().iter().map(|h| h.id.as_str()).collect();
            assert_eq!(ids, ["near", "far", "unknown"]);
        }

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_list() {
        let api = Arc::new(HospitalApi::with_list(vec![hospital("a", Some(2.0))]));
        let (refresher, mut rx) =
            HospitalListRefresher::new(Arc::clone(&api), "e1", Duration::from_secs(30));
        let cancel = CancellationToken::new();
        let handle = refresher.start(cancel.clone());

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().len(), 1);

        api.set_error();
        tokio::time::sleep(Duration::from_secs(95)).await;
        assert!(api.calls() >= 3);
        assert_eq!(rx.borrow().as_ref().unwrap().len(), 1, "stale list stays visible");

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_prevents_further_fetches() {
        let api = Arc::new(HospitalApi::with_list(vec![hospital("a", Some(2.0))]));
        let (refresher, mut rx) =
            HospitalListRefresher::new(Arc::clone(&api), "e1", Duration::from_secs(30));
        let cancel = CancellationToken::new();
        let handle = refresher.start(cancel.clone());

        rx.changed().await.unwrap();
        let calls_before = api.calls();

        cancel.cancel();
        handle.await.unwrap();

        tokio::time::advance(Duration::from_secs(300)).await;
        assert_eq!(api.calls(), calls_before);
    }
}
