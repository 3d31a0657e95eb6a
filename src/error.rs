//! Client error types.

use derive_more::{Display, Error};

/// Error raised by the client while talking to the move-generation server.
///
/// The three variants match how callers are expected to react:
/// [`ClientError::Network`] is surfaced to the user and never retried,
/// [`ClientError::Validation`] is caught at the call site and downgraded to
/// an informational log entry, and [`ClientError::Config`] is rejected
/// before any network call is made.
#[derive(Debug, Clone, Display, Error)]
pub enum ClientError {
    /// Transport failure or non-success response from the server.
    #[display("network error: {message}")]
    Network {
        /// What went wrong, as reported by the transport or server body.
        message: String,
    },

    /// The server rejected the request as semantically invalid (HTTP 400),
    /// e.g. an undo at the initial position.
    #[display("rejected by server: {message}")]
    Validation {
        /// Server-provided rejection detail.
        message: String,
    },

    /// A request that is malformed on its face, detected before any
    /// network traffic.
    #[display("invalid configuration: {message}")]
    Config {
        /// Description of the offending parameter.
        message: String,
    },
}

impl ClientError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error came from the server calling the request invalid,
    /// as opposed to the transport failing.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err.to_string())
    }
}
