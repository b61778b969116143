//! Error types for dynrpc client operations

use thiserror::Error;

/// Result type for dynrpc client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error type for dynrpc client operations.
///
/// Note the deliberately small surface: a JSON-RPC error envelope from the
/// server is NOT an error here. Those come back as ordinary `Ok` responses,
/// verbatim, and callers inspect the `error` member themselves.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level errors (endpoint validation, HTTP client setup)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The method name failed validation before an envelope was built
    #[error("Invalid method name: {0:?}")]
    InvalidMethod(String),

    /// A bound-method invocation named something discovery never bound
    #[error("No bound method named {0:?}")]
    UnboundMethod(String),

    /// A failed exchange carried an error body that is not JSON. This is
    /// the one transport outcome that cannot be normalized into a response.
    #[error("Transport error body is not valid JSON (status {status:?}): {source}")]
    MalformedErrorBody {
        status: Option<u16>,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Envelope serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport-specific errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP transport error: {0}")]
    Http(String),
}

impl ClientError {
    /// Create the error for a non-JSON transport error body
    pub fn malformed_body(status: Option<u16>, body: String, source: serde_json::Error) -> Self {
        Self::MalformedErrorBody {
            status,
            body,
            source,
        }
    }

    /// Check whether this is the non-JSON error body condition
    pub fn is_malformed_body(&self) -> bool {
        matches!(self, Self::MalformedErrorBody { .. })
    }

    /// HTTP status attached to the failure, when one was observed
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::MalformedErrorBody { status, .. } => *status,
            _ => None,
        }
    }
}
