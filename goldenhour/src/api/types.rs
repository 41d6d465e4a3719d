//! Wire types for the dispatch backend.
//!
//! These are our own types, decoupled from whatever the backend happens to
//! serve. Optional fields default to absent so that older or partial backend
//! payloads still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Patient vital signs captured by the intake form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// Blood pressure as reported, e.g. "140/90"
    pub blood_pressure: String,
    /// Heart rate in beats per minute
    pub heart_rate: u32,
    /// Blood oxygen saturation in percent
    pub oxygen_level: u32,
}

/// Triage submission payload for `POST /triage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRequest {
    pub patient_name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    /// Free-text symptom description; the backend splits on commas.
    pub symptoms: String,
    pub vitals: Vitals,
    pub location: Coordinate,
}

/// Backend response to a triage submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResponse {
    pub emergency_id: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub recommended_specialty: Option<String>,
    /// Estimated response time in minutes.
    #[serde(default)]
    pub estimated_response_time: Option<u32>,
}

/// Processing phase of an emergency, as reported by `GET /status/{id}`.
///
/// The backend's status vocabulary is open-ended; anything outside the known
/// set maps to [`EmergencyPhase::Unknown`] rather than failing the poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmergencyPhase {
    Pending,
    Processing,
    Assigned,
    Completed,
    #[serde(other)]
    Unknown,
}

/// Snapshot of an emergency's dispatch state.
///
/// Consumers always replace the whole value with the latest poll result;
/// the only in-place mutation is the resolver merging hospital detail into
/// [`EmergencyStatus::hospital`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyStatus {
    pub emergency_id: String,
    pub status: EmergencyPhase,
    /// Reference to the hospital the backend has assigned, if any.
    #[serde(default)]
    pub assigned_hospital: Option<String>,
    /// Full hospital detail, merged in by the resolver once assigned.
    #[serde(default)]
    pub hospital: Option<HospitalSummary>,
}

impl EmergencyStatus {
    /// Whether the backend has assigned a hospital to this emergency.
    ///
    /// Assignment is indicated either by the `ASSIGNED` phase or by the
    /// presence of an assigned-hospital reference; some backend versions set
    /// one before the other.
    pub fn is_assigned(&self) -> bool {
        self.status == EmergencyPhase::Assigned || self.assigned_hospital.is_some()
    }
}

/// A hospital as listed for an emergency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<Coordinate>,
    /// Distance from the emergency in kilometers, if the backend computed it.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Estimated travel time in minutes.
    #[serde(default)]
    pub eta: Option<u32>,
    #[serde(default)]
    pub beds_available: Option<u32>,
    #[serde(default)]
    pub specialties: Option<Vec<String>>,
    #[serde(default)]
    pub is_recommended: bool,
}

/// Response of `GET /hospitals/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalListResponse {
    #[serde(default)]
    pub emergency_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub hospitals: Vec<HospitalSummary>,
}

/// Latest ambulance fix from `GET /ambulance/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbulanceLocation {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>,
}

impl AmbulanceLocation {
    /// The fix as a [`Coordinate`], or `None` if the components are not
    /// finite numbers.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(Some(self.lat), Some(self.lng))
    }
}

/// Payload for `POST /notify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub hospital_id: String,
    pub emergency_id: String,
}

/// Acknowledgement returned by `POST /notify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub confirmation_id: Option<String>,
}
