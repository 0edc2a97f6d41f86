//! Error types for the comment API client.
//!
//! # Design
//! Transport failures are kept apart from `ApiError`: the `send_*` methods
//! report them as a missing body rather than as an error, while `execute`
//! hands them to the caller untouched.

use thiserror::Error;

/// Errors returned by `HttpRequester` send methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be decoded as JSON or into the
    /// requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// Errors produced by a `Transport` implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A wire header line could not be applied to the outgoing request.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The request never produced a response (connection, DNS, bad URL).
    #[error("request failed: {0}")]
    Request(String),
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        TransportError::Request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_display() {
        let err = ApiError::Serialization("key must be a string".to_string());
        assert_eq!(err.to_string(), "serialization failed: key must be a string");
    }

    #[test]
    fn deserialization_display() {
        let err = ApiError::Deserialization("expected value".to_string());
        assert_eq!(err.to_string(), "deserialization failed: expected value");
    }

    #[test]
    fn transport_error_display() {
        let err = TransportError::InvalidHeader("no-colon".to_string());
        assert_eq!(err.to_string(), "invalid header: no-colon");

        let err = TransportError::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }
}
