//! Integration tests for the full watch flow.
//!
//! These exercise the complete path through the service facade: triage
//! submission, status polling to assignment, hospital enrichment, and the
//! two dependent refreshers, all against a scripted mock backend.
//!
//! Run with: `cargo test --test watch_flow`

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;

use goldenhour::api::{
    AmbulanceLocation, ApiError, DispatchApi, EmergencyPhase, EmergencyStatus,
    HospitalListResponse, HospitalSummary, NotifyReceipt, NotifyRequest, TriageRequest,
    TriageResponse, Vitals,
};
use goldenhour::config::Settings;
use goldenhour::geo::Coordinate;
use goldenhour::service::DispatchService;
use goldenhour::session::Session;
use goldenhour::status::StatusEvent;

// ============================================================================
// Test Helpers
// ============================================================================

/// Scripted mock backend covering every endpoint the daemons touch.
///
/// Status responses are consumed from a script; once the script runs dry,
/// further fetches report PENDING.
struct MockBackend {
    statuses: Mutex<VecDeque<EmergencyStatus>>,
    status_calls: AtomicUsize,
    selected: Mutex<Option<Result<HospitalSummary, ApiError>>>,
    selected_calls: AtomicUsize,
    hospital_calls: AtomicUsize,
    ambulance_calls: AtomicUsize,
}

impl MockBackend {
    fn with_statuses(statuses: Vec<EmergencyStatus>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            status_calls: AtomicUsize::new(0),
            selected: Mutex::new(Some(Ok(hospital("h1", Some(5.2))))),
            selected_calls: AtomicUsize::new(0),
            hospital_calls: AtomicUsize::new(0),
            ambulance_calls: AtomicUsize::new(0),
        }
    }

    fn with_failing_resolver(self) -> Self {
        *self.selected.lock().unwrap() = Some(Err(ApiError::Backend {
            status: 503,
            path: "/hospitals/e1/selected".to_string(),
        }));
        self
    }
}

impl DispatchApi for MockBackend {
    async fn submit_triage(&self, request: &TriageRequest) -> Result<TriageResponse, ApiError> {
        Ok(TriageResponse {
            emergency_id: format!(
                "emer_{}_{}",
                request.patient_name.replace(' ', "_").to_lowercase(),
                request.age
            ),
            severity: Some("critical".to_string()),
            recommended_specialty: Some("Cardiology".to_string()),
            estimated_response_time: Some(15),
        })
    }

    async fn fetch_status(&self, id: &str) -> Result<EmergencyStatus, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| pending(id)))
    }

    async fn fetch_hospitals(&self, id: &str) -> Result<HospitalListResponse, ApiError> {
        self.hospital_calls.fetch_add(1, Ordering::SeqCst);
        Ok(HospitalListResponse {
            emergency_id: Some(id.to_string()),
            status: Some("PENDING".to_string()),
            hospitals: vec![
                hospital("far", Some(9.5)),
                hospital("unknown", None),
                hospital("near", Some(2.0)),
            ],
        })
    }

    async fn fetch_selected_hospital(&self, _: &str) -> Result<HospitalSummary, ApiError> {
        self.selected_calls.fetch_add(1, Ordering::SeqCst);
        self.selected
            .lock()
            .unwrap()
            .take()
            .expect("selected hospital requested more than once")
    }

    async fn fetch_ambulance(&self, _: &str) -> Result<AmbulanceLocation, ApiError> {
        let n = self.ambulance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AmbulanceLocation {
            lat: 28.70 + n as f64 * 0.01,
            lng: 77.10,
            timestamp: Utc::now(),
        })
    }

    async fn notify_hospital(&self, _: &NotifyRequest) -> Result<NotifyReceipt, ApiError> {
        Ok(NotifyReceipt {
            success: true,
            message: None,
            confirmation_id: Some("notify_1".to_string()),
        })
    }
}

fn pending(id: &str) -> EmergencyStatus {
    EmergencyStatus {
        emergency_id: id.to_string(),
        status: EmergencyPhase::Pending,
        assigned_hospital: None,
        hospital: None,
    }
}

fn assigned(id: &str, hospital_ref: &str) -> EmergencyStatus {
    EmergencyStatus {
        emergency_id: id.to_string(),
        status: EmergencyPhase::Assigned,
        assigned_hospital: Some(hospital_ref.to_string()),
        hospital: None,
    }
}

fn hospital(id: &str, distance: Option<f64>) -> HospitalSummary {
    HospitalSummary {
        id: id.to_string(),
        name: format!("Hospital {}", id),
        address: Some("Mathura Rd".to_string()),
        location: Some(Coordinate::new(28.55, 77.25)),
        distance,
        eta: Some(12),
        beds_available: Some(8),
        specialties: None,
        is_recommended: false,
    }
}

fn triage_request() -> TriageRequest {
    TriageRequest {
        patient_name: "Rahul Sharma".to_string(),
        age: 45,
        gender: "male".to_string(),
        contact: "+91-9800000000".to_string(),
        symptoms: "Chest pain, difficulty breathing".to_string(),
        vitals: Vitals {
            blood_pressure: "140/90".to_string(),
            heart_rate: 95,
            oxygen_level: 92,
        },
        location: Coordinate::new(28.7041, 77.1025),
    }
}

fn service_for(
    backend: Arc<MockBackend>,
    state_dir: PathBuf,
) -> DispatchService<MockBackend> {
    let mut settings = Settings::from_lookup(|_| None);
    settings.state_dir = state_dir;
    DispatchService::with_api(backend, settings)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn watch_polls_to_assignment_and_enriches_hospital() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::with_statuses(vec![
        pending("e1"),
        pending("e1"),
        assigned("e1", "h1"),
    ]));
    let service = service_for(Arc::clone(&backend), dir.path().to_path_buf());

    let assigned_count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&assigned_count);
    let mut handle = service.watch_with(
        Session::new("e1"),
        Some(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    );

    assert!(matches!(handle.events.recv().await, Some(StatusEvent::Update(_))));
    assert!(matches!(handle.events.recv().await, Some(StatusEvent::Update(_))));

    match handle.events.recv().await.unwrap() {
        StatusEvent::Assigned(status) => {
            assert_eq!(status.emergency_id, "e1");
            assert_eq!(status.assigned_hospital.as_deref(), Some("h1"));
            assert_eq!(status.hospital.unwrap().id, "h1");
        }
        other => panic!("expected Assigned, got {:?}", other),
    }

    // The poller is done; no more events
    assert!(handle.events.recv().await.is_none());
    assert_eq!(backend.status_calls.load(Ordering::SeqCst), 3);
    assert_eq!(backend.selected_calls.load(Ordering::SeqCst), 1);
    assert_eq!(assigned_count.load(Ordering::SeqCst), 1);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn assignment_survives_resolver_failure() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(
        MockBackend::with_statuses(vec![assigned("e1", "h1")]).with_failing_resolver(),
    );
    let service = service_for(Arc::clone(&backend), dir.path().to_path_buf());

    let mut handle = service.watch(Session::new("e1"));

    match handle.events.recv().await.unwrap() {
        StatusEvent::Assigned(status) => {
            assert_eq!(status.status, EmergencyPhase::Assigned);
            assert!(status.hospital.is_none());
        }
        other => panic!("expected Assigned, got {:?}", other),
    }

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn refreshers_publish_independently_of_assignment() {
    let dir = tempfile::tempdir().unwrap();
    // Status stays PENDING for the whole test
    let backend = Arc::new(MockBackend::with_statuses(vec![]));
    let service = service_for(Arc::clone(&backend), dir.path().to_path_buf());

    let mut handle = service.watch(Session::new("e1"));

    handle.ambulance.changed().await.unwrap();
    assert!(handle.ambulance.borrow().is_some());

    handle.hospitals.changed().await.unwrap();
    {
        let list = handle.hospitals.borrow();
        let ids: Vec<&str> = list.as_ref().unwrap().iter().map(|h| h.id.as_str()).collect();
        // Sorted by distance, missing distance last
        assert_eq!(ids, ["near", "far", "unknown"]);
    }

    // Ambulance refreshes more often than the hospital list
    tokio::time::sleep(Duration::from_secs(31)).await;
    assert!(backend.ambulance_calls.load(Ordering::SeqCst) >= 6);
    assert!(backend.hospital_calls.load(Ordering::SeqCst) >= 2);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_all_loops() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::with_statuses(vec![]));
    let service = service_for(Arc::clone(&backend), dir.path().to_path_buf());

    let mut handle = service.watch(Session::new("e1"));
    handle.ambulance.changed().await.unwrap();

    handle.shutdown().await;

    let status_calls = backend.status_calls.load(Ordering::SeqCst);
    let ambulance_calls = backend.ambulance_calls.load(Ordering::SeqCst);
    let hospital_calls = backend.hospital_calls.load(Ordering::SeqCst);

    // Nothing fires after shutdown
    tokio::time::advance(Duration::from_secs(120)).await;
    assert_eq!(backend.status_calls.load(Ordering::SeqCst), status_calls);
    assert_eq!(backend.ambulance_calls.load(Ordering::SeqCst), ambulance_calls);
    assert_eq!(backend.hospital_calls.load(Ordering::SeqCst), hospital_calls);
}

#[tokio::test]
async fn submit_then_resume_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(MockBackend::with_statuses(vec![]));
    let service = service_for(Arc::clone(&backend), dir.path().to_path_buf());

    let triage = service.submit(&triage_request()).await.unwrap();
    assert_eq!(triage.emergency_id, "emer_rahul_sharma_45");

    // A fresh service over the same state dir resumes the same emergency
    let service2 = service_for(backend, dir.path().to_path_buf());
    let session = service2.resume().unwrap().unwrap();
    assert_eq!(session.emergency_id, "emer_rahul_sharma_45");
}
