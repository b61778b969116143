//! Batch construction for multicall

use dynrpc_protocol::RequestParams;

/// An ordered collection of calls sent to the server as one batch envelope.
///
/// Entry order is preserved all the way to the wire: the first call added
/// is the first element of the batch array. Each entry still gets its own
/// id from the client's counter at send time.
///
/// ```
/// use dynrpc_client::Multicall;
/// use serde_json::json;
///
/// let batch = Multicall::new()
///     .call("sum", vec![json!(1), json!(2)])
///     .call_no_params("system.status");
/// assert_eq!(batch.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Multicall {
    calls: Vec<(String, Option<RequestParams>)>,
}

impl Multicall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call with positional or named parameters
    pub fn call(mut self, method: impl Into<String>, params: impl Into<RequestParams>) -> Self {
        self.calls.push((method.into(), Some(params.into())));
        self
    }

    /// Append a call whose envelope carries no `params` field
    pub fn call_no_params(mut self, method: impl Into<String>) -> Self {
        self.calls.push((method.into(), None));
        self
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub(crate) fn into_calls(self) -> Vec<(String, Option<RequestParams>)> {
        self.calls
    }
}
