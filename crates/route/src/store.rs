//! RouteStore - active route storage
//!
//! Holds the waypoint sequence the agent is currently driving and serves
//! cyclic lookups against it.

use contracts::{AgentError, Waypoint};

/// Active route storage
///
/// The route is replaced as a whole or not at all; there is no partial
/// mutation API. Lookups take the current length into account on every
/// call, so an index captured before a `replace` still resolves to a
/// valid waypoint afterwards.
#[derive(Debug, Clone, Default)]
pub struct RouteStore {
    waypoints: Vec<Waypoint>,
}

impl RouteStore {
    /// Create a store from an initial waypoint sequence
    ///
    /// An empty sequence is accepted here; publishing against an empty
    /// store skips ticks until a non-empty route is installed.
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    /// Number of waypoints in the active route
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the active route has no waypoints
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Read-only view of the active route
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Waypoint at the given logical index
    ///
    /// Returns `None` only when the route is empty; any other index is
    /// reduced modulo the current length.
    pub fn waypoint_at(&self, index: usize) -> Option<Waypoint> {
        if self.waypoints.is_empty() {
            return None;
        }
        Some(self.waypoints[index % self.waypoints.len()])
    }

    /// Successor of the given logical index on the cycle
    ///
    /// Returns 0 for an empty route.
    pub fn next_index(&self, index: usize) -> usize {
        if self.waypoints.is_empty() {
            return 0;
        }
        (index + 1) % self.waypoints.len()
    }

    /// Replace the whole route atomically
    ///
    /// # Errors
    /// Rejects an empty replacement with [`AgentError::EmptyRoute`]; the
    /// previously active route stays in effect.
    pub fn replace(&mut self, waypoints: Vec<Waypoint>) -> Result<(), AgentError> {
        if waypoints.is_empty() {
            return Err(AgentError::EmptyRoute);
        }
        self.waypoints = waypoints;
        Ok(())
    }
}
