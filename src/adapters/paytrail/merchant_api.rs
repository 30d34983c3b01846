//! Paytrail Merchant API facade.
//!
//! One method per remote operation. Each builds the endpoint path (and JSON
//! body for writes), signs it, sends it through the [`MerchantTransport`]
//! port and classifies the result against the operation's expected status.
//!
//! Every method returns an [`Outcome`]; no error crosses this boundary.
//!
//! # Identifiers
//!
//! Ids, tokens and order numbers are placed in the path verbatim, without
//! percent-encoding. They must be URL-safe (visible ASCII, no `#`); anything
//! else is rewritten on send and fails signature verification with a 401.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use paytrail_merchant::adapters::paytrail::MerchantApi;
//! use paytrail_merchant::adapters::transport::ReqwestTransport;
//! use paytrail_merchant::config::HttpConfig;
//! use paytrail_merchant::domain::merchant::Credentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::new(&HttpConfig::default())?;
//! let api = MerchantApi::new(Credentials::new("13466", "secret"), Arc::new(transport));
//!
//! let outcome = api.get_payment_details("123").await;
//! if outcome.is_success() {
//!     println!("{}", outcome.content().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Serialize;

use crate::adapters::transport::ReqwestTransport;
use crate::config::{HttpConfig, MerchantConfig};
use crate::domain::merchant::{Credentials, Outcome, SettlementRange};
use crate::ports::{HttpMethod, MerchantTransport, TransportError, TransportResponse};

use super::classifier::{classify, classify_refund_creation};
use super::endpoints;
use super::signer::RequestSigner;

/// Production API origin.
pub const DEFAULT_API_URL: &str = "https://api.paytrail.com";

const STATUS_OK: u16 = 200;
const STATUS_NO_CONTENT: u16 = 204;

const REFUND_ORIGIN_HEADER: &str = "refund-origin";

/// JSON body of a refund creation.
#[derive(Debug, Serialize)]
struct RefundRequest<'a, R: Serialize> {
    rows: &'a [R],
    email: &'a str,
    #[serde(rename = "notifyUrl", skip_serializing_if = "Option::is_none")]
    notify_url: Option<&'a str>,
}

/// Client for the Paytrail Merchant API.
///
/// Holds immutable credentials and a shared transport; safe to share across
/// tasks.
#[derive(Clone)]
pub struct MerchantApi {
    signer: RequestSigner,
    transport: Arc<dyn MerchantTransport>,
    base_url: String,
}

impl MerchantApi {
    /// Creates a client against the production API.
    pub fn new(credentials: Credentials, transport: Arc<dyn MerchantTransport>) -> Self {
        Self {
            signer: RequestSigner::new(credentials),
            transport,
            base_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Points the client at another API origin (staging, local test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builds a client with a reqwest transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the HTTP client cannot be built.
    pub fn from_config(
        merchant: &MerchantConfig,
        http: &HttpConfig,
    ) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(http)?;
        let credentials = Credentials::from_secret(merchant.id.clone(), merchant.secret.clone());

        Ok(Self::new(credentials, Arc::new(transport)).with_base_url(merchant.api_url.clone()))
    }

    /// Returns the API origin requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the merchant credentials.
    pub fn credentials(&self) -> &Credentials {
        self.signer.credentials()
    }

    /// Creates a refund for a payment.
    ///
    /// On success the content is the refund token taken from the `Location`
    /// header. `notify_url` is omitted from the body when `None`.
    pub async fn create_refund<R: Serialize>(
        &self,
        payment_id: u64,
        rows: &[R],
        email: &str,
        notify_url: Option<&str>,
    ) -> Outcome {
        let request = RefundRequest {
            rows,
            email,
            notify_url,
        };

        let body = match serde_json::to_string(&request) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(payment_id, error = %e, "Failed to encode refund request");
                return Outcome::failed(format!("Failed to encode refund request: {}", e));
            }
        };

        let mut extra_headers = HeaderMap::new();
        extra_headers.insert(
            HeaderName::from_static(REFUND_ORIGIN_HEADER),
            HeaderValue::from_static("internal"),
        );
        extra_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let result = self
            .execute(
                HttpMethod::Post,
                endpoints::create_refund(payment_id),
                body,
                extra_headers,
            )
            .await;

        classify_refund_creation(result)
    }

    /// Cancels a refund. Success content is the (empty) response body.
    ///
    /// `refund_token` is sent verbatim and must be URL-safe.
    pub async fn cancel_refund(&self, refund_token: &str) -> Outcome {
        let result = self
            .execute(
                HttpMethod::Delete,
                endpoints::refund(refund_token),
                String::new(),
                HeaderMap::new(),
            )
            .await;

        classify(result, STATUS_NO_CONTENT)
    }

    /// Gets refund details.
    ///
    /// `refund_token` is sent verbatim and must be URL-safe.
    pub async fn get_refund_details(&self, refund_token: &str) -> Outcome {
        self.get(endpoints::refund(refund_token)).await
    }

    /// Lists settlements between two dates.
    ///
    /// When `to_date` is `None` the range ends on the current UTC date.
    pub async fn get_settlements(&self, from_date: NaiveDate, to_date: Option<NaiveDate>) -> Outcome {
        let range = SettlementRange::new(from_date, to_date);
        self.get(endpoints::settlements(&range)).await
    }

    /// Gets settlement details.
    ///
    /// `settlement_id` is sent verbatim and must be URL-safe.
    pub async fn get_settlement_details(&self, settlement_id: &str) -> Outcome {
        self.get(endpoints::settlement(settlement_id)).await
    }

    /// Gets payment details.
    ///
    /// `payment_id` is sent verbatim and must be URL-safe.
    pub async fn get_payment_details(&self, payment_id: &str) -> Outcome {
        self.get(endpoints::payment(payment_id)).await
    }

    /// Lists payments by order number.
    ///
    /// `order_number` is sent verbatim in the query and must be URL-safe.
    pub async fn get_payments(&self, order_number: &str) -> Outcome {
        self.get(endpoints::payments_by_order_number(order_number))
            .await
    }

    async fn get(&self, path: String) -> Outcome {
        let result = self
            .execute(HttpMethod::Get, path, String::new(), HeaderMap::new())
            .await;

        classify(result, STATUS_OK)
    }

    /// Signs and sends one request.
    async fn execute(
        &self,
        method: HttpMethod,
        path: String,
        body: String,
        extra_headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        tracing::debug!(%method, path = %path, "Sending merchant API request");

        if !endpoints::is_wire_safe(&path) {
            tracing::warn!(
                %method,
                path = %path,
                "Path contains characters that are percent-encoded on send; the signature will not verify"
            );
        }

        let request = self
            .signer
            .sign(method, path.as_str(), body, extra_headers)
            .into_outgoing(&self.base_url)
            .map_err(|e| {
                tracing::warn!(%method, path = %path, error = %e, "Request could not be signed");
                TransportError::new(e.to_string())
            })?;

        let result = self.transport.send(request).await;

        match &result {
            Ok(response) => {
                tracing::debug!(%method, path = %path, status = response.status, "Merchant API responded");
            }
            Err(e) => {
                tracing::warn!(%method, path = %path, error = %e, "Merchant API request failed without a response");
            }
        }

        result
    }
}
