//! Error types for the Smocker client.
//!
//! # Design
//! Transport failures, non-2xx responses and undecodable bodies each get their
//! own variant so callers can tell "the server is unreachable" apart from "the
//! server said no" apart from "the server said something unexpected". No
//! variant is retried by the client.

use thiserror::Error;

/// Errors returned by `SmockerClient` parse methods and `SmockerApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused, DNS,
    /// timeout, broken body stream).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Server { .. })
    }

    /// HTTP status carried by a `Server` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display_includes_status_and_body() {
        let err = ApiError::Server {
            status: 500,
            body: r#"{"error":"boom"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"HTTP 500: {"error":"boom"}"#);
        assert!(err.is_server_error());
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert!(!err.is_server_error());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "transport failed: connection refused");
    }
}
