//! # JSON-RPC 2.0 Request Envelopes
//!
//! The request-side data model shared by the dynrpc client: ids, the
//! protocol version marker, single request envelopes, and (as plain vectors)
//! batch envelopes. Responses are deliberately not modeled here; the client
//! hands server replies back as raw `serde_json::Value` so nothing is lost
//! in translation.
//!
//! ## Wire rules encoded in the types
//! - `jsonrpc` is always the literal `"2.0"`, and anything else fails to parse
//! - `id` is a number or a string, never null
//! - `params` is positional or named; a request without params omits the
//!   field instead of sending `null`

pub mod request;
pub mod types;

// Re-export main types
pub use request::{JsonRpcRequest, RequestParams};
pub use types::{JsonRpcVersion, RequestId};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";
