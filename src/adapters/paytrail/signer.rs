//! Request signing for the Paytrail Merchant API.
//!
//! Every request carries three security headers:
//!
//! - `timestamp`: RFC 3339 time of signing, checked server-side for freshness
//! - `content-md5`: base64 MD5 of the exact body bytes
//! - `authorization`: `PaytrailMerchantAPI {id}:{hash}`
//!
//! The hash is base64 HMAC-SHA256, keyed with the merchant secret, over the
//! newline-joined method, path, `PaytrailMerchantAPI {id}`, timestamp and
//! content digest. Field order and the `\n` separator are part of the wire
//! contract.
//!
//! MD5 here is a content fingerprint inside the signed material, not a
//! security primitive; it must stay MD5 for the server to verify.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use sha2::Sha256;
use thiserror::Error;

use crate::domain::merchant::Credentials;
use crate::ports::{HttpMethod, OutgoingRequest};

type HmacSha256 = Hmac<Sha256>;

/// Authorization scheme name, also part of the signed material.
pub const AUTHORIZATION_SCHEME: &str = "PaytrailMerchantAPI";

/// Header carrying the signing timestamp.
pub const TIMESTAMP_HEADER: &str = "timestamp";

/// Header carrying the body digest.
pub const CONTENT_MD5_HEADER: &str = "content-md5";

/// Header carrying the signature.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// A signed value that cannot be sent as an HTTP header.
#[derive(Debug, Error)]
#[error("Invalid {header} header value: {source}")]
pub struct SigningError {
    pub header: &'static str,
    #[source]
    pub source: InvalidHeaderValue,
}

/// Signs merchant API requests with the merchant's shared secret.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Creates a signer for the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Returns the credentials used for signing.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Current time as RFC 3339 with seconds precision and numeric offset.
    pub fn timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// Base64 MD5 digest of the body bytes.
    pub fn content_digest(body: &[u8]) -> String {
        STANDARD.encode(Md5::digest(body))
    }

    /// Base64 HMAC-SHA256 over the signing template.
    pub fn authorization_hash(
        &self,
        method: HttpMethod,
        path: &str,
        timestamp: &str,
        content_digest: &str,
    ) -> String {
        let merchant = format!("{} {}", AUTHORIZATION_SCHEME, self.credentials.id());
        let message = [method.as_str(), path, &merchant, timestamp, content_digest].join("\n");

        let mut mac = HmacSha256::new_from_slice(self.credentials.secret_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());

        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// `Authorization` header value for a computed hash.
    pub fn authorization_header(&self, hash: &str) -> String {
        format!("{} {}:{}", AUTHORIZATION_SCHEME, self.credentials.id(), hash)
    }

    /// Signs a request at the current time.
    pub fn sign(
        &self,
        method: HttpMethod,
        path: impl Into<String>,
        body: impl Into<String>,
        extra_headers: HeaderMap,
    ) -> SignedRequest {
        self.sign_at(method, path, body, extra_headers, Self::timestamp())
    }

    /// Signs a request at a fixed timestamp.
    pub fn sign_at(
        &self,
        method: HttpMethod,
        path: impl Into<String>,
        body: impl Into<String>,
        extra_headers: HeaderMap,
        timestamp: impl Into<String>,
    ) -> SignedRequest {
        let path = path.into();
        let body = body.into();
        let timestamp = timestamp.into();

        let content_digest = Self::content_digest(body.as_bytes());
        let hash = self.authorization_hash(method, &path, &timestamp, &content_digest);
        let authorization_header = self.authorization_header(&hash);

        SignedRequest {
            method,
            path,
            timestamp,
            content_digest,
            authorization_header,
            body,
            extra_headers,
        }
    }
}

/// A request with its security headers computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub timestamp: String,
    pub content_digest: String,
    pub authorization_header: String,
    pub body: String,
    pub extra_headers: HeaderMap,
}

impl SignedRequest {
    /// Security headers merged with the extra headers.
    ///
    /// An extra header with the same name as a security header replaces it.
    ///
    /// # Errors
    ///
    /// Returns `SigningError` if a signed value is not a valid header value,
    /// e.g. a merchant id containing control characters.
    pub fn headers(&self) -> Result<HeaderMap, SigningError> {
        let mut headers = HeaderMap::with_capacity(3 + self.extra_headers.len());
        headers.insert(
            HeaderName::from_static(TIMESTAMP_HEADER),
            header_value(TIMESTAMP_HEADER, &self.timestamp)?,
        );
        headers.insert(
            HeaderName::from_static(CONTENT_MD5_HEADER),
            header_value(CONTENT_MD5_HEADER, &self.content_digest)?,
        );
        headers.insert(
            HeaderName::from_static(AUTHORIZATION_HEADER),
            header_value(AUTHORIZATION_HEADER, &self.authorization_header)?,
        );
        headers.extend(self.extra_headers.clone());

        Ok(headers)
    }

    /// Builds the transport request against a base URL.
    ///
    /// # Errors
    ///
    /// Returns `SigningError` if the headers cannot be built.
    pub fn into_outgoing(self, base_url: &str) -> Result<OutgoingRequest, SigningError> {
        let headers = self.headers()?;
        Ok(OutgoingRequest {
            method: self.method,
            url: format!("{}{}", base_url, self.path),
            headers,
            body: self.body,
        })
    }
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, SigningError> {
    HeaderValue::from_str(value).map_err(|source| SigningError { header, source })
}
