//! Coordinate type definitions

use serde::{Deserialize, Serialize};

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;

/// A geographic coordinate as exchanged with the dispatch backend.
///
/// Invariant: both fields are finite. Construct from untrusted payloads with
/// [`Coordinate::from_parts`], which normalizes malformed values to `None`
/// instead of producing a coordinate that violates the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees, positive north
    pub lat: f64,
    /// Longitude in decimal degrees, positive east
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate from values already known to be finite.
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Normalizes possibly-missing or malformed components into a coordinate.
    ///
    /// Backend payloads occasionally omit one component or carry NaN from an
    /// upstream parse. Those all normalize to `None`; this never panics.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Self { lat, lng })
            }
            _ => None,
        }
    }

    /// Checks whether both components fall inside the valid lat/lng ranges.
    #[inline]
    pub fn in_range(&self) -> bool {
        (MIN_LAT..=MAX_LAT).contains(&self.lat) && (MIN_LNG..=MAX_LNG).contains(&self.lng)
    }
}
