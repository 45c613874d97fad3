//! GeoVAN wire messages
//!
//! Protobuf message types declared with prost derive macros. Field numbers
//! are the compatibility contract with the platform's subscribers and must
//! not be reassigned.

use bytes::{Bytes, BytesMut};
use prost::Message;

use crate::{AgentError, TelemetryReport};

/// Geographic coordinate pair
#[derive(Clone, Copy, PartialEq, Message)]
pub struct GeoPoint {
    /// Latitude (degrees)
    #[prost(double, tag = "1")]
    pub lat: f64,

    /// Longitude (degrees)
    #[prost(double, tag = "2")]
    pub lon: f64,
}

/// Vehicle position report as published on the wire
#[derive(Clone, PartialEq, Message)]
pub struct VehiclePosition {
    /// Vehicle identifier
    #[prost(string, tag = "1")]
    pub id: String,

    /// Current position
    #[prost(message, optional, tag = "2")]
    pub pos: Option<GeoPoint>,

    /// Speed (units/sec)
    #[prost(double, tag = "3")]
    pub speed: f64,

    /// Heading (degrees, [0, 360))
    #[prost(double, tag = "4")]
    pub heading: f64,

    /// Wall-clock time at emission (ms since Unix epoch)
    #[prost(int64, tag = "5")]
    pub timestamp: i64,

    /// Per-session sequence number
    #[prost(uint32, tag = "6")]
    pub seq: u32,
}

impl From<&TelemetryReport> for VehiclePosition {
    fn from(report: &TelemetryReport) -> Self {
        Self {
            id: report.vehicle_id.clone(),
            pos: Some(GeoPoint {
                lat: report.position.lat,
                lon: report.position.lon,
            }),
            speed: report.speed,
            heading: report.heading,
            timestamp: report.timestamp_ms,
            seq: report.sequence,
        }
    }
}

/// Encode a report into its wire payload
///
/// # Errors
/// Returns an encode error if the message cannot be written.
pub fn encode_report(report: &TelemetryReport) -> Result<Bytes, AgentError> {
    let msg = VehiclePosition::from(report);
    let mut buf = BytesMut::with_capacity(msg.encoded_len());
    msg.encode(&mut buf)
        .map_err(|e| AgentError::encode(e.to_string()))?;
    Ok(buf.freeze())
}

/// Decode a wire payload back into a position message
///
/// # Errors
/// Returns a decode error for truncated or malformed payloads.
pub fn decode_position(payload: &[u8]) -> Result<VehiclePosition, AgentError> {
    VehiclePosition::decode(payload).map_err(|e| AgentError::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Waypoint;

    fn sample_report() -> TelemetryReport {
        TelemetryReport {
            vehicle_id: "vehicle-001".to_string(),
            position: Waypoint::new(28.7041, 77.1025),
            speed: 11.5,
            heading: 193.2,
            timestamp_ms: 1_700_000_000_000,
            sequence: 42,
        }
    }

    #[test]
    fn test_encode_report_carries_all_fields() {
        let payload = encode_report(&sample_report()).unwrap();
        let decoded = decode_position(&payload).unwrap();

        assert_eq!(decoded.id, "vehicle-001");
        let pos = decoded.pos.unwrap();
        assert!((pos.lat - 28.7041).abs() < 1e-12);
        assert!((pos.lon - 77.1025).abs() < 1e-12);
        assert!((decoded.speed - 11.5).abs() < 1e-12);
        assert!((decoded.heading - 193.2).abs() < 1e-12);
        assert_eq!(decoded.timestamp, 1_700_000_000_000);
        assert_eq!(decoded.seq, 42);
    }

    #[test]
    fn test_decode_rejects_malformed_payload() {
        // Field 1 declared as varint instead of string
        let garbage = [0x08, 0xff, 0xff];
        assert!(decode_position(&garbage).is_err());
    }
}
