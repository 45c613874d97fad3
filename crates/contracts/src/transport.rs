//! Transport trait - PublishAgent output interface
//!
//! Defines the abstract interface for pub/sub transports.

use bytes::Bytes;

use crate::AgentError;

/// Pub/sub transport trait
///
/// All transport implementations must implement this trait.
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Transport name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Open the connection to the broker
    ///
    /// # Errors
    /// Returns a connection error; callers treat this as fatal at startup
    async fn connect(&mut self) -> Result<(), AgentError>;

    /// Publish one encoded report on the given topic
    ///
    /// At-most-once delivery: implementations must not retry internally.
    async fn publish(&mut self, topic: &str, payload: Bytes) -> Result<(), AgentError>;

    /// Close the connection
    async fn disconnect(&mut self) -> Result<(), AgentError>;
}
