//! Main dynrpc client implementation
//!
//! One dispatch pipeline serves every operation: build envelopes, hand the
//! payload to the transport, normalize the outcome. Awaited calls and
//! handler-completed calls differ only in who consumes that pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use serde_json::Value;
use tracing::{debug, info, warn};

use dynrpc_protocol::{JsonRpcRequest, RequestId, RequestParams};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::multicall::Multicall;
use crate::registry::{DISCOVERY_METHOD, MethodRegistry};
use crate::transport::{BoxedTransport, HttpTransport, Transport, TransportContext};

/// A JSON-RPC 2.0 client with runtime-discovered method bindings.
///
/// Construction runs one `system.listMethods` exchange and binds every
/// advertised method under a sanitized name; those bindings are then
/// invoked through [`Client::invoke_bound`]. Explicit [`Client::call`]
/// works with or without bindings.
///
/// Responses are returned as verbatim envelopes. A server-side error
/// envelope is an `Ok` value here; only transport-level breakdowns that
/// cannot be normalized into a response surface as `Err`.
pub struct Client {
    /// Transport layer, shared with spawned dispatch tasks
    transport: Arc<dyn Transport>,
    /// Bindings discovered at construction
    registry: MethodRegistry,
    /// Request ID counter; first assigned id is 1
    seq: AtomicI64,
}

impl Client {
    /// Connect to `endpoint` with default transport options.
    ///
    /// Shorthand for [`ClientBuilder::new`] followed by
    /// [`ClientBuilder::connect`].
    pub async fn connect(endpoint: &str) -> ClientResult<Self> {
        ClientBuilder::new(endpoint).connect().await
    }

    /// Issue a single call and wait for the response envelope.
    ///
    /// The returned value is exactly what the server sent back, error
    /// envelopes included. Inspect `response["error"]` or
    /// `response["result"]` as needed.
    pub async fn call(
        &self,
        method: &str,
        params: impl Into<RequestParams>,
    ) -> ClientResult<Value> {
        let request = self.build_request(method, Some(params.into()))?;
        let payload = serde_json::to_value(&request)?;
        let (outcome, _context) = dispatch(self.transport.as_ref(), payload).await;
        outcome
    }

    /// Issue a single call and deliver the outcome to `completion`.
    ///
    /// Returns as soon as the exchange is handed to the runtime, before
    /// the server answers. The handler runs exactly once, receiving the
    /// normalized outcome and the transport context of the exchange. Must
    /// be called within a tokio runtime.
    pub fn call_with<F>(
        &self,
        method: &str,
        params: impl Into<RequestParams>,
        completion: F,
    ) -> ClientResult<()>
    where
        F: FnOnce(ClientResult<Value>, TransportContext) + Send + 'static,
    {
        let request = self.build_request(method, Some(params.into()))?;
        let payload = serde_json::to_value(&request)?;
        self.spawn_dispatch(payload, completion);
        Ok(())
    }

    /// Send a batch of calls as one envelope and wait for the response.
    ///
    /// Entries go on the wire in the order they were added to `batch`,
    /// each under its own request id. The response array is returned
    /// verbatim; JSON-RPC allows the server to answer out of order, so
    /// correlate by id, not position.
    pub async fn multicall(&self, batch: Multicall) -> ClientResult<Value> {
        let payload = self.build_batch(batch)?;
        let (outcome, _context) = dispatch(self.transport.as_ref(), payload).await;
        outcome
    }

    /// Send a batch of calls and deliver the outcome to `completion`.
    pub fn multicall_with<F>(&self, batch: Multicall, completion: F) -> ClientResult<()>
    where
        F: FnOnce(ClientResult<Value>, TransportContext) + Send + 'static,
    {
        let payload = self.build_batch(batch)?;
        self.spawn_dispatch(payload, completion);
        Ok(())
    }

    /// Invoke a discovered method by its bound (sanitized) name.
    ///
    /// The envelope carries the original remote name, not the bound one:
    /// a method discovered as `"BOOKS/list"` and bound as `BOOKS_list`
    /// goes on the wire as `"BOOKS/list"`.
    pub async fn invoke_bound(
        &self,
        name: &str,
        params: impl Into<RequestParams>,
    ) -> ClientResult<Value> {
        let remote = self.resolve_bound(name)?;
        debug!(bound = name, remote, "Dispatching bound method");
        self.call(remote, params).await
    }

    /// Invoke a discovered method, delivering the outcome to `completion`.
    pub fn invoke_bound_with<F>(
        &self,
        name: &str,
        params: impl Into<RequestParams>,
        completion: F,
    ) -> ClientResult<()>
    where
        F: FnOnce(ClientResult<Value>, TransportContext) + Send + 'static,
    {
        let remote = self.resolve_bound(name)?;
        debug!(bound = name, remote, "Dispatching bound method");
        self.call_with(remote, params, completion)
    }

    /// All bound method names, sorted
    pub fn methods(&self) -> Vec<&str> {
        self.registry.bound_names()
    }

    /// Remote method name behind a bound name, if discovery bound it
    pub fn resolve(&self, bound: &str) -> Option<&str> {
        self.registry.resolve(bound)
    }

    /// Endpoint this client delivers to
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Run the discovery exchange and install the resulting bindings.
    ///
    /// A failed exchange normalizes to `null` like any other call, which
    /// binds nothing; the client stays usable for explicit calls. Only
    /// the malformed-error-body condition aborts construction.
    async fn discover(mut self) -> ClientResult<Self> {
        let request = self.build_request(DISCOVERY_METHOD, None)?;
        let payload = serde_json::to_value(&request)?;
        let (outcome, _context) = dispatch(self.transport.as_ref(), payload).await;

        self.registry = MethodRegistry::from_response(&outcome?);
        info!(
            endpoint = %self.transport.endpoint(),
            methods = self.registry.len(),
            "Client connected"
        );
        Ok(self)
    }

    /// Generate the next request id
    fn next_request_id(&self) -> RequestId {
        RequestId::Number(self.seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Build one request envelope, consuming exactly one id.
    ///
    /// Validation happens before the id is taken so a rejected name does
    /// not burn a counter value.
    fn build_request(
        &self,
        method: &str,
        params: Option<RequestParams>,
    ) -> ClientResult<JsonRpcRequest> {
        if method.is_empty() {
            return Err(ClientError::InvalidMethod(method.to_string()));
        }
        Ok(JsonRpcRequest::new(self.next_request_id(), method, params))
    }

    /// Build the batch payload, one envelope per entry in order
    fn build_batch(&self, batch: Multicall) -> ClientResult<Value> {
        let mut envelopes = Vec::with_capacity(batch.len());
        for (method, params) in batch.into_calls() {
            envelopes.push(self.build_request(&method, params)?);
        }
        Ok(serde_json::to_value(&envelopes)?)
    }

    /// Look up a bound name, failing with `UnboundMethod` when absent
    fn resolve_bound(&self, name: &str) -> ClientResult<&str> {
        self.registry
            .resolve(name)
            .ok_or_else(|| ClientError::UnboundMethod(name.to_string()))
    }

    /// Drive one exchange on a spawned task and hand the outcome to the
    /// completion handler
    fn spawn_dispatch<F>(&self, payload: Value, completion: F)
    where
        F: FnOnce(ClientResult<Value>, TransportContext) + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            let (outcome, context) = dispatch(transport.as_ref(), payload).await;
            completion(outcome, context);
        });
    }
}

/// Drive one transport exchange and normalize the outcome.
///
/// Delivered responses pass through verbatim. Failed exchanges are
/// reconstructed from whatever error body came back: a JSON body becomes
/// the response, no body becomes `null`, and a non-JSON body is the one
/// condition reported as `Err`.
async fn dispatch(
    transport: &dyn Transport,
    payload: Value,
) -> (ClientResult<Value>, TransportContext) {
    match transport.post(payload).await {
        Ok(reply) => (Ok(reply.body), reply.context),
        Err(failure) => {
            let context = failure.context;
            match failure.body {
                None => (Ok(Value::Null), context),
                Some(text) if text.is_empty() => (Ok(Value::Null), context),
                Some(text) => match serde_json::from_str(&text) {
                    Ok(reconstructed) => {
                        debug!(
                            status = ?context.status,
                            "Reconstructed response from error body"
                        );
                        (Ok(reconstructed), context)
                    }
                    Err(e) => {
                        warn!(status = ?context.status, "Error body is not JSON");
                        (
                            Err(ClientError::malformed_body(context.status, text, e)),
                            context,
                        )
                    }
                },
            }
        }
    }
}

/// Builder for creating dynrpc clients
pub struct ClientBuilder {
    endpoint: String,
    config: ClientConfig,
    transport: Option<BoxedTransport>,
}

impl ClientBuilder {
    /// Create a builder targeting `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            config: ClientConfig::default(),
            transport: None,
        }
    }

    /// Set transport options for the default HTTP transport
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Substitute the transport wholesale.
    ///
    /// The builder's endpoint and config only shape the default HTTP
    /// transport; an injected transport supersedes both.
    pub fn with_transport(mut self, transport: BoxedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client: construct the transport, then run discovery and
    /// bind whatever the server advertises.
    pub async fn connect(self) -> ClientResult<Client> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => Arc::from(transport),
            None => Arc::new(HttpTransport::new(&self.endpoint, &self.config)?),
        };

        let client = Client {
            transport,
            registry: MethodRegistry::empty(),
            seq: AtomicI64::new(0),
        };
        client.discover().await
    }
}
