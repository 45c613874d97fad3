//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Route file not found
    #[error("Route file not found: {path}")]
    RouteNotFound { path: String },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    /// Broker connection error
    #[error("Failed to connect to broker at {endpoint}: {message}")]
    BrokerConnection { endpoint: String, message: String },

    /// Agent execution error
    #[error("Agent execution failed: {message}")]
    AgentExecution { message: String },

    /// Graceful shutdown error
    #[error("Error during shutdown: {message}")]
    Shutdown { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

#[allow(dead_code)]
impl CliError {
    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self::RouteNotFound { path: path.into() }
    }

    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    pub fn broker_connection(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BrokerConnection {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn agent_execution(message: impl Into<String>) -> Self {
        Self::AgentExecution {
            message: message.into(),
        }
    }

    pub fn shutdown(message: impl Into<String>) -> Self {
        Self::Shutdown {
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, CliError>;
