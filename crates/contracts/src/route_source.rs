//! RouteSource trait - Route data source abstraction
//!
//! Decouples the route store from where waypoints come from
//! (file, built-in default, test fixtures).

use crate::{AgentError, Waypoint};

/// Route data source trait
///
/// Loading is a one-shot, synchronous operation performed at startup or on
/// explicit request; sources do not watch for changes.
pub trait RouteSource {
    /// Human-readable description of the source (used for logging)
    fn describe(&self) -> String;

    /// Load the full waypoint sequence
    ///
    /// # Errors
    /// Returns a load error; callers keep the previously active route.
    fn load(&self) -> Result<Vec<Waypoint>, AgentError>;
}
