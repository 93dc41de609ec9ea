//! Error types for Consul agent operations

use thiserror::Error;

/// Main error type for Consul agent operations
#[derive(Debug, Error)]
pub enum ConsulError {
    /// Transport-level error (network, connection, etc.) before any response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The configured request timeout elapsed
    #[error("Request timeout")]
    Timeout,

    /// The agent answered with a non-2xx status code
    #[error("Unexpected response code: {status} ({body})")]
    Status {
        /// HTTP status code returned by the agent
        status: u16,

        /// Response body, kept for diagnostics
        body: String,
    },

    /// The response body is not valid JSON or does not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request body could not be serialized
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Request rejected before it was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Client misuse or an unexpected response variant
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl ConsulError {
    /// Status code of a `Status` error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ConsulError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request failed before a response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, ConsulError::Transport(_) | ConsulError::Timeout)
    }
}

/// Result type alias for Consul agent operations
pub type ConsulResult<T> = Result<T, ConsulError>;

impl From<reqwest::Error> for ConsulError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ConsulError::Timeout
        } else if err.is_connect() {
            ConsulError::Transport(format!("Connection error: {}", err))
        } else {
            ConsulError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ConsulError {
    fn from(err: url::ParseError) -> Self {
        ConsulError::Transport(format!("Invalid agent URL: {}", err))
    }
}
