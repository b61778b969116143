//! Configuration types for the dynrpc client

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Options for the HTTP transport collaborator.
///
/// Two parts of every exchange are fixed and not configurable: requests go
/// out as POST, and the content type is always
/// `application/json; charset=utf-8`. Whether a call blocks or completes
/// through a handler is chosen per call, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Custom headers to include in every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Connection timeout. `None` keeps the HTTP client's own default.
    #[serde(default, with = "opt_duration_serde")]
    pub connect_timeout: Option<Duration>,

    /// Per-request timeout. `None` means a stalled call waits indefinitely.
    #[serde(default, with = "opt_duration_serde")]
    pub request_timeout: Option<Duration>,

    /// User agent string
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            connect_timeout: Some(Duration::from_secs(10)),
            request_timeout: None,
            user_agent: Some(format!("dynrpc-client/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl ClientConfig {
    /// Add a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

// Helper module for Option<Duration> serialization as milliseconds
mod opt_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(duration) => serializer.serialize_some(&(duration.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<u64>::deserialize(deserializer)?;
        Ok(millis.map(Duration::from_millis))
    }
}
