//! HTTP transport implementation for the dynrpc client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientResult, TransportError};
use crate::transport::{Transport, TransportContext, TransportFailure, TransportReply};

/// Every request carries this content type, regardless of configured headers.
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP POST transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client
    client: Client,
    /// Server endpoint URL
    endpoint: Url,
    /// Extra headers from configuration
    headers: HeaderMap,
}

impl HttpTransport {
    /// Create a new HTTP transport from configuration
    pub fn new(endpoint: &str, config: &ClientConfig) -> ClientResult<Self> {
        let url = parse_endpoint(endpoint)?;

        let mut builder = Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: url,
            headers: build_header_map(config)?,
        })
    }

    /// Create an HTTP transport with a custom reqwest client
    pub fn with_client(endpoint: &str, client: Client) -> ClientResult<Self> {
        let url = parse_endpoint(endpoint)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Ok(Self {
            client,
            endpoint: url,
            headers,
        })
    }
}

/// Parse and validate an endpoint URL
fn parse_endpoint(endpoint: &str) -> Result<Url, TransportError> {
    let url = Url::parse(endpoint)
        .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidEndpoint(format!(
            "Unsupported scheme for HTTP transport: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Convert configured string headers into a reqwest header map.
///
/// The content type is installed last so a configured `content-type`
/// entry cannot override or duplicate it.
fn build_header_map(config: &ClientConfig) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::Http(format!("Invalid header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::Http(format!("Invalid header value: {}", e)))?;
        headers.insert(name, value);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    Ok(headers)
}

#[async_trait]
impl Transport for HttpTransport {
    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    async fn post(&self, payload: Value) -> Result<TransportReply, TransportFailure> {
        let body = match serde_json::to_vec(&payload) {
            Ok(body) => body,
            Err(e) => {
                return Err(TransportFailure::without_body(TransportContext::failed(
                    None,
                    format!("Payload serialization failed: {}", e),
                )));
            }
        };

        debug!(endpoint = %self.endpoint, bytes = body.len(), "Sending JSON-RPC payload");

        let result = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "HTTP exchange failed");
                let status = e.status().map(|s| s.as_u16());
                return Err(TransportFailure::without_body(TransportContext::failed(
                    status,
                    e.to_string(),
                )));
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(status = %status, error = %e, "Failed to read response body");
                return Err(TransportFailure::without_body(TransportContext::failed(
                    Some(status.as_u16()),
                    format!("Failed to read response body: {}", e),
                )));
            }
        };

        if !status.is_success() {
            debug!(status = %status, "Server answered with HTTP error status");
            let context =
                TransportContext::failed(Some(status.as_u16()), format!("HTTP {}", status));
            return Err(if text.is_empty() {
                TransportFailure::without_body(context)
            } else {
                TransportFailure::new(text, context)
            });
        }

        match serde_json::from_str(&text) {
            Ok(body) => {
                debug!(status = %status, "Received JSON response");
                Ok(TransportReply::new(body, TransportContext::ok(status.as_u16())))
            }
            Err(e) => {
                warn!(status = %status, error = %e, "Response body is not JSON");
                Err(TransportFailure::new(
                    text,
                    TransportContext::failed(
                        Some(status.as_u16()),
                        format!("Response body is not JSON: {}", e),
                    ),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_creation() {
        let transport =
            HttpTransport::new("http://localhost:8080/rpc", &ClientConfig::default()).unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:8080/rpc");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = HttpTransport::new("not a url", &ClientConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let result = HttpTransport::new("ws://localhost:8080/rpc", &ClientConfig::default());
        assert!(result.is_err());

        let result = HttpTransport::new("file:///tmp/rpc", &ClientConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn custom_client_construction() {
        let client = Client::builder().build().unwrap();
        let transport = HttpTransport::with_client("https://example.com/rpc", client).unwrap();
        assert_eq!(transport.endpoint(), "https://example.com/rpc");
    }

    #[test]
    fn configured_headers_are_validated() {
        let config = ClientConfig::default().with_header("x-api-key", "secret");
        assert!(HttpTransport::new("http://localhost/rpc", &config).is_ok());

        let config = ClientConfig::default().with_header("bad header\n", "value");
        assert!(HttpTransport::new("http://localhost/rpc", &config).is_err());
    }

    #[test]
    fn content_type_cannot_be_overridden() {
        let config = ClientConfig::default().with_header("content-type", "text/xml");
        let headers = build_header_map(&config).unwrap();

        let mut values = headers.get_all(CONTENT_TYPE).iter();
        assert_eq!(values.next().map(|v| v.to_str().unwrap()), Some(JSON_CONTENT_TYPE));
        assert!(values.next().is_none());
    }
}
