//! LogTransport - 把报告写入日志而不是真实 broker
//!
//! 用于本地调试和演示。发布永远成功。

use bytes::Bytes;
use contracts::{wire, AgentError, Transport};
use tracing::{debug, info, instrument, warn};

/// Transport that logs every report instead of sending it anywhere
pub struct LogTransport {
    name: String,
}

impl LogTransport {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LogTransport {
    fn default() -> Self {
        Self::new("log")
    }
}

impl Transport for LogTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_connect", skip(self), fields(transport = %self.name))]
    async fn connect(&mut self) -> Result<(), AgentError> {
        info!(transport = %self.name, "LogTransport ready (no broker)");
        Ok(())
    }

    #[instrument(
        name = "log_publish",
        skip(self, payload),
        fields(transport = %self.name, topic)
    )]
    async fn publish(&mut self, topic: &str, payload: Bytes) -> Result<(), AgentError> {
        match wire::decode_position(&payload) {
            Ok(position) => {
                let (lat, lon) = position
                    .pos
                    .map(|p| (p.lat, p.lon))
                    .unwrap_or((f64::NAN, f64::NAN));
                info!(
                    vehicle = %position.id,
                    sequence = position.seq,
                    lat,
                    lon,
                    speed = format!("{:.2}", position.speed),
                    heading = format!("{:.1}", position.heading),
                    "Report logged"
                );
            }
            Err(e) => {
                // 无法解码时仍然接受, 只记录原始大小
                warn!(bytes = payload.len(), error = %e, "Opaque payload logged");
            }
        }
        Ok(())
    }

    #[instrument(name = "log_disconnect", skip(self), fields(transport = %self.name))]
    async fn disconnect(&mut self) -> Result<(), AgentError> {
        debug!(transport = %self.name, "LogTransport closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{wire, TelemetryReport, Waypoint};

    fn sample_report() -> TelemetryReport {
        TelemetryReport {
            vehicle_id: "vehicle-001".to_string(),
            position: Waypoint::new(28.7041, 77.1025),
            speed: 10.0,
            heading: 135.0,
            timestamp_ms: 1_700_000_000_000,
            sequence: 7,
        }
    }

    #[tokio::test]
    async fn test_publish_decodable_payload_succeeds() {
        let mut transport = LogTransport::default();
        transport.connect().await.unwrap();

        let payload = wire::encode_report(&sample_report()).unwrap();
        transport.publish("geovan/positions", payload).await.unwrap();

        transport.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_publish_opaque_payload_still_succeeds() {
        let mut transport = LogTransport::new("debug-log");
        assert_eq!(transport.name(), "debug-log");

        let garbage = Bytes::from_static(&[0xff, 0xff, 0xff, 0xff]);
        transport.publish("geovan/positions", garbage).await.unwrap();
    }
}
