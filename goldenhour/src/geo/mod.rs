//! Geographic distance module
//!
//! Provides the great-circle distance calculation used to rank hospitals by
//! proximity when the backend does not precompute distances, plus the lenient
//! coordinate normalization applied to backend payloads.

mod types;

pub use types::{Coordinate, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the great-circle distance between two coordinates in kilometers.
///
/// Uses the haversine formula with a mean Earth radius of 6371 km. The result
/// is rounded to one decimal place, matching the precision the backend uses
/// for its own distance fields.
///
/// Inputs are not range-checked: out-of-range latitudes or longitudes produce
/// a numeric but meaningless result. Callers sanitize with
/// [`Coordinate::from_parts`] first.
#[inline]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let d = 2.0 * EARTH_RADIUS_KM * h.sqrt().asin();

    // Round to one decimal place
    (d * 10.0).round() / 10.0
}
