//! # Route
//!
//! Route loading and storage module.
//!
//! Responsibilities:
//! - Parse waypoint files (`lat,lon` per line)
//! - Hold the active route and serve cyclic lookups
//! - Provide the built-in fallback route
//!
//! # Example
//!
//! ```no_run
//! use contracts::RouteSource;
//! use route::{FileRouteSource, RouteStore};
//!
//! let source = FileRouteSource::new("route.txt");
//! let mut store = RouteStore::new(route::default_route());
//! if let Ok(waypoints) = source.load() {
//!     store.replace(waypoints).unwrap();
//! }
//! ```

mod file;
mod store;

pub use file::{parse_route, FileRouteSource, ParsedRoute, StaticRouteSource};
pub use store::RouteStore;

use contracts::Waypoint;

/// Built-in fallback route (Delhi loop)
///
/// Used when no route file is configured or the configured file cannot be
/// loaded at startup.
pub fn default_route() -> Vec<Waypoint> {
    vec![
        Waypoint::new(28.7041, 77.1025),
        Waypoint::new(28.6139, 77.2090),
        Waypoint::new(28.7041, 77.1025),
    ]
}
