//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Reports carry wall-clock milliseconds since the Unix epoch, sampled at emission
//! - `sequence` is a per-session monotonic counter, used downstream for gap detection

mod error;
mod report;
mod route_source;
mod transport;
mod waypoint;

pub mod wire;

pub use error::*;
pub use report::*;
pub use route_source::RouteSource;
pub use transport::*;
pub use waypoint::Waypoint;
