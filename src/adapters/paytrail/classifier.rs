//! Maps transport results onto [`Outcome`].
//!
//! A transport error becomes `Failed` with its message. A response with an
//! unexpected status becomes `Failed` with the server's structured error
//! (`{"error":{"title","description","workaround"}}`) formatted as
//! `"{title}: {description}, {workaround}"`. Anything else is `Success`.

use reqwest::header::LOCATION;
use serde::Deserialize;

use crate::domain::merchant::Outcome;
use crate::ports::{TransportError, TransportResponse};

/// Status returned when a refund is accepted.
pub const REFUND_CREATED_STATUS: u16 = 202;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    title: String,
    description: String,
    workaround: String,
}

/// Classifies a transport result, using the body as success content.
pub fn classify(
    result: Result<TransportResponse, TransportError>,
    accepted_status: u16,
) -> Outcome {
    classify_with(result, accepted_status, |response| Ok(response.body))
}

/// Classifies the result of a refund creation.
///
/// The accepted response has no body; the refund token is the last
/// `/`-delimited segment of the `Location` header.
pub fn classify_refund_creation(result: Result<TransportResponse, TransportError>) -> Outcome {
    classify_with(result, REFUND_CREATED_STATUS, |response| {
        refund_token(&response)
    })
}

/// Formats the structured error body of a failed response.
///
/// Bodies that do not match the expected shape fall back to the status code
/// and raw body.
pub fn parse_failure_body(response: &TransportResponse) -> String {
    match serde_json::from_str::<ErrorEnvelope>(&response.body) {
        Ok(ErrorEnvelope { error }) => format!(
            "{}: {}, {}",
            error.title, error.description, error.workaround
        ),
        Err(e) => {
            tracing::warn!(
                status = response.status,
                error = %e,
                "Merchant API error body did not match the expected shape"
            );
            let body = response.body.trim();
            if body.is_empty() {
                format!("Unexpected HTTP status {}", response.status)
            } else {
                format!("Unexpected HTTP status {}: {}", response.status, body)
            }
        }
    }
}

fn classify_with<F>(
    result: Result<TransportResponse, TransportError>,
    accepted_status: u16,
    extract: F,
) -> Outcome
where
    F: FnOnce(TransportResponse) -> Result<String, String>,
{
    let response = match result {
        Ok(response) => response,
        Err(e) => return Outcome::failed(e.message),
    };

    if response.status != accepted_status {
        tracing::warn!(
            status = response.status,
            expected = accepted_status,
            "Merchant API returned unexpected status"
        );
        return Outcome::failed(parse_failure_body(&response));
    }

    match extract(response) {
        Ok(content) => Outcome::success(content),
        Err(error) => Outcome::failed(error),
    }
}

fn refund_token(response: &TransportResponse) -> Result<String, String> {
    let location = response
        .header(LOCATION)
        .ok_or_else(|| "Refund accepted but response has no Location header".to_string())?;

    match location.trim().rsplit('/').next() {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(format!(
            "Refund accepted but Location header has no refund token: {}",
            location
        )),
    }
}
