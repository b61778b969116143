//! Transport layer for the dynrpc client
//!
//! A transport performs exactly one job: POST a JSON payload and hand back
//! whatever the server answered. It never interprets JSON-RPC semantics.
//! Distinguishing "the server answered with an error envelope" from "the
//! exchange itself failed" happens above this seam, in the client.

use async_trait::async_trait;
use serde_json::Value;

pub mod http;

// Re-export transport implementations
pub use http::HttpTransport;

/// Metadata about one HTTP exchange, as far as it got.
///
/// Completion handlers receive this alongside the outcome so callers can
/// log status codes or inspect failure detail without the client having
/// interpreted any of it.
#[derive(Debug, Clone, Default)]
pub struct TransportContext {
    /// HTTP status code, when a status line was received
    pub status: Option<u16>,
    /// Adapter detail: error text, status line, timeout description
    pub detail: Option<String>,
}

impl TransportContext {
    /// Context for an exchange that produced a response
    pub fn ok(status: u16) -> Self {
        Self {
            status: Some(status),
            detail: None,
        }
    }

    /// Context for a failed exchange
    pub fn failed(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: Some(detail.into()),
        }
    }
}

/// A delivered response: parsed JSON body plus exchange metadata.
#[derive(Debug, Clone)]
pub struct TransportReply {
    /// Response body (JSON)
    pub body: Value,
    /// Exchange metadata
    pub context: TransportContext,
}

impl TransportReply {
    pub fn new(body: Value, context: TransportContext) -> Self {
        Self { body, context }
    }
}

/// A failed exchange. `body` carries the raw error payload when the server
/// sent one; what to make of it is the client's decision, not the transport's.
#[derive(Debug, Clone)]
pub struct TransportFailure {
    /// Raw response body, if any was received
    pub body: Option<String>,
    /// Exchange metadata
    pub context: TransportContext,
}

impl TransportFailure {
    pub fn new(body: impl Into<String>, context: TransportContext) -> Self {
        Self {
            body: Some(body.into()),
            context,
        }
    }

    /// A failure where no response body was received at all
    pub fn without_body(context: TransportContext) -> Self {
        Self {
            body: None,
            context,
        }
    }
}

/// Transport trait defining the single-exchange interface.
///
/// Implementations must be shareable across tasks; the client drives
/// handler-completed calls from spawned tasks holding the same transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Endpoint this transport delivers to, for diagnostics
    fn endpoint(&self) -> &str;

    /// Perform one POST exchange carrying `payload` as the JSON body.
    ///
    /// `Ok` means a JSON body came back, regardless of what it says.
    /// Everything else (connection failure, non-2xx status, unparseable
    /// 2xx body) is a `TransportFailure` carrying whatever was received.
    async fn post(&self, payload: Value) -> Result<TransportReply, TransportFailure>;
}

/// Type alias for a boxed transport
pub type BoxedTransport = Box<dyn Transport>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_constructors() {
        let ok = TransportContext::ok(200);
        assert_eq!(ok.status, Some(200));
        assert!(ok.detail.is_none());

        let failed = TransportContext::failed(Some(503), "service unavailable");
        assert_eq!(failed.status, Some(503));
        assert_eq!(failed.detail.as_deref(), Some("service unavailable"));

        let lost = TransportContext::failed(None, "connection refused");
        assert_eq!(lost.status, None);
    }

    #[test]
    fn failure_body_is_optional() {
        let with_body = TransportFailure::new("{\"error\":1}", TransportContext::ok(500));
        assert_eq!(with_body.body.as_deref(), Some("{\"error\":1}"));

        let bare = TransportFailure::without_body(TransportContext::failed(None, "timed out"));
        assert!(bare.body.is_none());
    }
}
