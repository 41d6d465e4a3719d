//! Hospital resolver - enriches an assigned status with hospital detail.

use tracing::{debug, warn};

use crate::api::{DispatchApi, EmergencyStatus};

/// Fetches the selected hospital for an assigned emergency and merges it
/// into the status payload's `hospital` field.
///
/// All other status fields are left untouched. If the hospital fetch fails,
/// the original status is returned unchanged and the failure is logged; the
/// status flow must not fail merely because enrichment failed.
pub async fn resolve_hospital<C: DispatchApi>(
    api: &C,
    mut status: EmergencyStatus,
) -> EmergencyStatus {
    match api.fetch_selected_hospital(&status.emergency_id).await {
        Ok(hospital) => {
            debug!(
                emergency_id = %status.emergency_id,
                hospital_id = %hospital.id,
                "Resolved assigned hospital"
            );
            status.hospital = Some(hospital);
        }
        Err(e) => {
            warn!(
                emergency_id = %status.emergency_id,
                error = %e,
                "Failed to fetch assigned hospital detail, reporting status without it"
            );
        }
    }

    status
}
