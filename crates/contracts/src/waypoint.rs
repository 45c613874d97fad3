//! Waypoint - route position sample
//!
//! A single point on the simulated route.

use serde::{Deserialize, Serialize};

/// Geographic waypoint
///
/// Waypoints are immutable once loaded; the active route is only ever
/// replaced as a whole, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Latitude (degrees)
    pub lat: f64,

    /// Longitude (degrees)
    pub lon: f64,
}

impl Waypoint {
    /// Create a new waypoint
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
