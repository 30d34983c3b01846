//! reqwest-backed implementation of the `MerchantTransport` port.
//!
//! reqwest never turns a status code into an error unless asked to, so every
//! response that reached us (4xx/5xx included) is handed back as
//! `TransportResponse`. Only connection-level failures and unreadable
//! bodies become `TransportError`; the latter keep the status in the message.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::HttpConfig;
use crate::ports::{HttpMethod, MerchantTransport, OutgoingRequest, TransportError, TransportResponse};

/// HTTP transport using a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the TLS backend or client cannot be
    /// initialised.
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| TransportError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wraps a caller-supplied client (custom proxy, TLS roots, middleware).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl MerchantTransport for ReqwestTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url)
            .headers(request.headers);

        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, url = %request.url, "HTTP request failed");
            TransportError::new(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();

        let body = response.text().await.map_err(|e| {
            tracing::warn!(status, error = %e, url = %request.url, "Failed to read response body");
            TransportError::new(format!("HTTP {}: failed to read response body: {}", status, e))
        })?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
