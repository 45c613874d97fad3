//! Heading and speed computation.

use contracts::Waypoint;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Lower bound of sampled speed (units/sec)
pub const SPEED_MIN: f64 = 8.0;

/// Upper bound of sampled speed (units/sec)
pub const SPEED_MAX: f64 = 15.0;

/// Heading noise amplitude (degrees)
pub const HEADING_NOISE_DEG: f64 = 5.0;

/// Bearing from `current` towards `next`, degrees in [0, 360)
///
/// Flat-earth approximation: atan2 over the raw coordinate deltas, with
/// latitude as the north axis. Waypoints in this system are close enough
/// together that great-circle correction is not worth it.
pub fn bearing_between(current: Waypoint, next: Waypoint) -> f64 {
    let d_lat = next.lat - current.lat;
    let d_lon = next.lon - current.lon;

    let mut bearing = d_lon.atan2(d_lat).to_degrees();
    if bearing < 0.0 {
        bearing += 360.0;
    }
    bearing
}

/// Normalize a heading into [0, 360)
///
/// Applies exactly one correction step. Inputs are expected in
/// [-360, 720), which covers any bearing plus noise; values outside that
/// domain are a caller bug.
pub fn normalize_heading(heading: f64) -> f64 {
    if heading < 0.0 {
        heading + 360.0
    } else if heading >= 360.0 {
        heading - 360.0
    } else {
        heading
    }
}

/// Per-session sampling state
///
/// Owns its RNG so concurrent sessions never share generator state.
#[derive(Debug, Clone)]
pub struct MotionModel {
    rng: SmallRng,
}

impl MotionModel {
    /// Create a model seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Create a deterministic model for reproducible runs and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Sample a speed uniformly in [`SPEED_MIN`, `SPEED_MAX`]
    pub fn sample_speed(&mut self) -> f64 {
        self.rng.random_range(SPEED_MIN..=SPEED_MAX)
    }

    /// Sample heading noise uniformly in ±[`HEADING_NOISE_DEG`]
    pub fn heading_noise(&mut self) -> f64 {
        self.rng.random_range(-HEADING_NOISE_DEG..=HEADING_NOISE_DEG)
    }
}

impl Default for MotionModel {
    fn default() -> Self {
        Self::new()
    }
}
