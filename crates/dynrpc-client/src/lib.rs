//! # Dynamic JSON-RPC 2.0 Client
//!
//! A JSON-RPC 2.0 client that discovers the server's method catalog at
//! connect time and exposes every advertised method under a sanitized,
//! bindable name. Explicit calls, discovered-method calls, and ordered
//! batches all run through one dispatch pipeline.
//!
//! ## Features
//!
//! - **Runtime discovery**: one `system.listMethods` call binds the server's catalog
//! - **Verbatim envelopes**: responses come back untouched, error envelopes included
//! - **Two completion styles**: `await` the response, or hand in a completion handler
//! - **Ordered multicall**: batches preserve entry order and assign per-entry ids
//! - **Pluggable transport**: the HTTP adapter is default, any [`Transport`] will do
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dynrpc_client::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::connect("http://localhost:8080/rpc").await?;
//!
//!     for name in client.methods() {
//!         println!("bound method: {name}");
//!     }
//!
//!     let response = client.call("echo", vec![json!("hello")]).await?;
//!     println!("{response}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Batching
//!
//! ```rust,no_run
//! # use dynrpc_client::{Client, Multicall};
//! # use serde_json::json;
//! # async fn run(client: Client) -> Result<(), Box<dyn std::error::Error>> {
//! let batch = Multicall::new()
//!     .call("sum", vec![json!(1), json!(2)])
//!     .call_no_params("system.status");
//!
//! let responses = client.multicall(batch).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod multicall;
pub mod registry;
pub mod transport;

// Re-export main types
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, TransportError};
pub use multicall::Multicall;
pub use registry::{DISCOVERY_METHOD, MethodRegistry};

// Re-export transport types
pub use transport::{BoxedTransport, Transport, TransportContext, TransportFailure, TransportReply};

// Re-export protocol types for convenience
pub use dynrpc_protocol::*;

/// Convenient re-exports of the common client surface
pub mod prelude {
    pub use crate::client::{Client, ClientBuilder};
    pub use crate::config::ClientConfig;
    pub use crate::error::{ClientError, ClientResult};
    pub use crate::multicall::Multicall;
    pub use crate::transport::{Transport, TransportContext};
    pub use dynrpc_protocol::{JsonRpcRequest, RequestId, RequestParams};
}
