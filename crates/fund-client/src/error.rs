//! Error taxonomy for analysis submissions

use fund_core::ValidationError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Everything that can go wrong between building a request and holding a
/// normalized result
///
/// Each failure path stays distinguishable so callers can pick the right
/// message: fix the input (`Validation`), check the connection (`Network`),
/// or read the backend's own explanation (`Server`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Request rejected before submission; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport never got a response from the endpoint
    #[error("failed to connect to the server: {0}")]
    Network(String),

    /// Endpoint answered with a failure status
    #[error("the analysis failed ({status}): {detail}")]
    Server { status: u16, detail: String },

    /// Success status but the body was not usable JSON
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Bad client configuration, e.g. an unparseable base URL
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// True for failures the user can fix by correcting their input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
