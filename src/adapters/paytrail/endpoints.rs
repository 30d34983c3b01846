//! Endpoint paths of the Merchant API, relative to the base URL.
//!
//! Paths are signed exactly as built here, query string included. Values
//! are not percent-encoded: a value with spaces, non-ASCII characters or `#`
//! is rewritten by the URL parser before sending, so the signed path no
//! longer matches the sent one and the API rejects the signature.

use crate::domain::merchant::SettlementRange;

const PAYMENT_ENDPOINT: &str = "/merchant/v1/payments";
const REFUND_ENDPOINT: &str = "/merchant/v1/refunds";
const SETTLEMENT_ENDPOINT: &str = "/merchant/v1/settlements";

pub fn create_refund(payment_id: u64) -> String {
    format!("{}/{}/refunds", PAYMENT_ENDPOINT, payment_id)
}

pub fn refund(refund_token: &str) -> String {
    format!("{}/{}", REFUND_ENDPOINT, refund_token)
}

pub fn settlements(range: &SettlementRange) -> String {
    format!("{}?{}", SETTLEMENT_ENDPOINT, range.query())
}

pub fn settlement(settlement_id: &str) -> String {
    format!("{}/{}", SETTLEMENT_ENDPOINT, settlement_id)
}

pub fn payment(payment_id: &str) -> String {
    format!("{}/{}", PAYMENT_ENDPOINT, payment_id)
}

pub fn payments_by_order_number(order_number: &str) -> String {
    format!("{}?order_number={}", PAYMENT_ENDPOINT, order_number)
}

/// True when the URL parser will send `path` byte for byte as signed.
pub fn is_wire_safe(path: &str) -> bool {
    path.bytes().all(|b| b.is_ascii_graphic() && b != b'#')
}
