//! Layered error definitions
//!
//! Categorized by source: config / broker / route / codec

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum AgentError {
    // ===== Configuration Errors =====
    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Broker Errors =====
    /// Broker connection error
    #[error("broker connection error for '{endpoint}': {message}")]
    BrokerConnection { endpoint: String, message: String },

    /// Publish error
    #[error("publish error on topic '{topic}': {message}")]
    Publish { topic: String, message: String },

    /// Disconnect error
    #[error("disconnect error: {message}")]
    Disconnect { message: String },

    // ===== Route Errors =====
    /// Route load error
    #[error("route load error from {source_desc}: {message}")]
    RouteLoad {
        source_desc: String,
        message: String,
    },

    /// Empty route rejected
    #[error("route must contain at least one waypoint")]
    EmptyRoute,

    // ===== Codec Errors =====
    /// Wire encode error
    #[error("encode error: {message}")]
    Encode { message: String },

    /// Wire decode error
    #[error("decode error: {message}")]
    Decode { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create broker connection error
    pub fn broker_connection(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BrokerConnection {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create publish error
    pub fn publish(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Publish {
            topic: topic.into(),
            message: message.into(),
        }
    }

    /// Create disconnect error
    pub fn disconnect(message: impl Into<String>) -> Self {
        Self::Disconnect {
            message: message.into(),
        }
    }

    /// Create route load error
    pub fn route_load(source_desc: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RouteLoad {
            source_desc: source_desc.into(),
            message: message.into(),
        }
    }

    /// Create wire encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create wire decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
