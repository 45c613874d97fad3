//! BrokerTransport - TCP stream to the platform broker

use bytes::{BufMut, Bytes, BytesMut};
use contracts::{AgentError, Transport};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, instrument};

/// Transport that publishes over a TCP connection
///
/// Each publish writes one frame, flushed before returning:
///
/// ```text
/// ┌────────────────┬─────────────┬──────────────────┬──────────────┐
/// │ topic len (u16)│ topic bytes │ payload len (u32)│ payload bytes│
/// └────────────────┴─────────────┴──────────────────┴──────────────┘
/// ```
///
/// Both length prefixes are big-endian.
pub struct BrokerTransport {
    name: String,
    endpoint: String,
    stream: Option<TcpStream>,
}

impl BrokerTransport {
    /// Create a transport for the given `host:port` endpoint
    ///
    /// A leading `tcp://` scheme is accepted and stripped.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let endpoint = endpoint
            .strip_prefix("tcp://")
            .map(str::to_string)
            .unwrap_or(endpoint);

        Self {
            name: "broker".to_string(),
            endpoint,
            stream: None,
        }
    }

    /// Resolved broker endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn encode_frame(topic: &str, payload: &Bytes) -> BytesMut {
        let mut frame = BytesMut::with_capacity(2 + topic.len() + 4 + payload.len());
        frame.put_u16(topic.len() as u16);
        frame.put_slice(topic.as_bytes());
        frame.put_u32(payload.len() as u32);
        frame.put_slice(payload);
        frame
    }
}

impl Transport for BrokerTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "broker_connect",
        skip(self),
        fields(transport = %self.name, endpoint = %self.endpoint)
    )]
    async fn connect(&mut self) -> Result<(), AgentError> {
        let stream = TcpStream::connect(&self.endpoint)
            .await
            .map_err(|e| AgentError::broker_connection(&self.endpoint, e.to_string()))?;

        debug!(endpoint = %self.endpoint, "Broker connection established");
        self.stream = Some(stream);
        Ok(())
    }

    #[instrument(
        name = "broker_publish",
        skip(self, payload),
        fields(transport = %self.name, topic)
    )]
    async fn publish(&mut self, topic: &str, payload: Bytes) -> Result<(), AgentError> {
        if topic.len() > u16::MAX as usize {
            return Err(AgentError::publish(topic, "topic exceeds frame limit"));
        }

        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| AgentError::publish(topic, "not connected"))?;

        let frame = Self::encode_frame(topic, &payload);

        stream
            .write_all(&frame)
            .await
            .map_err(|e| AgentError::publish(topic, e.to_string()))?;
        stream
            .flush()
            .await
            .map_err(|e| AgentError::publish(topic, e.to_string()))?;

        debug!(bytes = frame.len(), "Frame sent");
        Ok(())
    }

    #[instrument(name = "broker_disconnect", skip(self), fields(transport = %self.name))]
    async fn disconnect(&mut self) -> Result<(), AgentError> {
        // Repeated disconnects are no-ops.
        if let Some(mut stream) = self.stream.take() {
            stream
                .shutdown()
                .await
                .map_err(|e| AgentError::disconnect(e.to_string()))?;
            debug!(transport = %self.name, "BrokerTransport closed");
        }
        Ok(())
    }
}
