//! Transport port for merchant API calls.
//!
//! Defines the contract between the merchant API facade and whatever
//! performs the HTTP exchange (reqwest in production, a scripted mock in
//! tests).
//!
//! # Contract
//!
//! - Any exchange that produced an HTTP response returns `Ok`, whatever the
//!   status code. 4xx/5xx responses are classified by the caller.
//! - Only failures with no response at all (DNS, refused connection,
//!   timeout) return `Err`.

use std::borrow::Cow;

use async_trait::async_trait;
use reqwest::header::{AsHeaderName, HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

/// Port for sending one signed request to the merchant API.
#[async_trait]
pub trait MerchantTransport: Send + Sync {
    /// Sends the request and returns the server's response.
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError>;
}

/// HTTP methods used by the merchant API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name, as signed and sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully signed request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// HTTP method.
    pub method: HttpMethod,

    /// Absolute URL (base URL + path and query).
    pub url: String,

    /// Security headers plus any extra headers.
    pub headers: HeaderMap,

    /// Request body; empty for reads and deletes.
    pub body: String,
}

impl OutgoingRequest {
    /// Looks up a header value by case-insensitive name.
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Response returned by the server, regardless of status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response headers.
    pub headers: HeaderMap,

    /// Response body text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response with no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Sets a header, replacing any previous value.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Looks up a header value by case-insensitive name.
    ///
    /// Bytes outside visible ASCII are kept, replaced lossily.
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<Cow<'_, str>> {
        self.headers
            .get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
    }
}

/// A failure where no HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Textual failure message, surfaced verbatim to callers.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
