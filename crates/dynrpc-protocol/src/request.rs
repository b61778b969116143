use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{JsonRpcVersion, RequestId};

/// Call arguments: positional (array) or named (object).
///
/// A request may also carry no params at all, in which case the field is
/// omitted from the envelope entirely rather than sent as `null` or `[]`.
/// That case is `Option<RequestParams>::None` on [`JsonRpcRequest`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RequestParams {
    /// Positional parameters
    Array(Vec<Value>),
    /// Named parameters
    Object(HashMap<String, Value>),
}

impl RequestParams {
    /// An empty positional parameter list. Still serialized as `[]`.
    pub fn empty() -> Self {
        RequestParams::Array(Vec::new())
    }

    pub fn len(&self) -> usize {
        match self {
            RequestParams::Array(vec) => vec.len(),
            RequestParams::Object(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RequestParams {
    fn default() -> Self {
        RequestParams::empty()
    }
}

impl From<Vec<Value>> for RequestParams {
    fn from(vec: Vec<Value>) -> Self {
        RequestParams::Array(vec)
    }
}

impl From<HashMap<String, Value>> for RequestParams {
    fn from(map: HashMap<String, Value>) -> Self {
        RequestParams::Object(map)
    }
}

impl FromIterator<Value> for RequestParams {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        RequestParams::Array(iter.into_iter().collect())
    }
}

/// A single JSON-RPC 2.0 request envelope.
///
/// Batches are plain `Vec<JsonRpcRequest>`; serde already produces the
/// required top-level JSON array for those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub id: RequestId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
}

impl JsonRpcRequest {
    pub fn new(
        id: impl Into<RequestId>,
        method: impl Into<String>,
        params: Option<RequestParams>,
    ) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id: id.into(),
            method: method.into(),
            params,
        }
    }

    /// A request whose envelope carries no `params` field.
    pub fn without_params(id: impl Into<RequestId>, method: impl Into<String>) -> Self {
        Self::new(id, method, None)
    }

    /// A request with positional or named parameters.
    pub fn with_params(
        id: impl Into<RequestId>,
        method: impl Into<String>,
        params: impl Into<RequestParams>,
    ) -> Self {
        Self::new(id, method, Some(params.into()))
    }
}
