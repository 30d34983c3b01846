//! Integration tests for the Merchant API client over real HTTP.
//!
//! A local axum server stands in for the Paytrail API. It recomputes the
//! content digest and HMAC signature of every request from the raw bytes it
//! received and rejects anything that does not verify, so these tests check
//! the signing contract end to end through `ReqwestTransport`.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, NaiveDate, Utc};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use serde::Serialize;
use serde_json::json;
use sha2::Sha256;

use paytrail_merchant::config::HttpConfig;
use paytrail_merchant::{Credentials, MerchantApi, Outcome, ReqwestTransport};

const MERCHANT_ID: &str = "13466";
const MERCHANT_SECRET: &str = "6pKF4jkv97zmqBJ3ZL8gUw5DfT2NMQ";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// A request as the fake API saw it.
#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path_and_query: String,
    headers: HeaderMap,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Refund row with a fixed field order, so the body digest is stable.
#[derive(Debug, Serialize)]
struct Row {
    title: &'static str,
    amount: u64,
}

#[derive(Clone, Default)]
struct FakeApi {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeApi {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> Recorded {
        self.requests().last().cloned().expect("no request recorded")
    }
}

fn error_body(title: &str, description: &str, workaround: &str) -> String {
    json!({
        "error": {
            "title": title,
            "description": description,
            "workaround": workaround,
        }
    })
    .to_string()
}

/// Recomputes the signature the way the API does. Returns the rejection
/// reason on mismatch.
fn verify_signature(method: &Method, path: &str, headers: &HeaderMap, body: &[u8]) -> Result<(), String> {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| format!("missing {} header", name))
    };

    let timestamp = get("timestamp")?;
    let content_md5 = get("content-md5")?;
    let authorization = get("authorization")?;

    let signed_at = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| format!("bad timestamp {}: {}", timestamp, e))?;
    if (Utc::now() - signed_at.with_timezone(&Utc)).num_seconds().abs() > 300 {
        return Err("stale timestamp".to_string());
    }

    let expected_md5 = STANDARD.encode(Md5::digest(body));
    if content_md5 != expected_md5 {
        return Err("content digest mismatch".to_string());
    }

    let merchant = format!("PaytrailMerchantAPI {}", MERCHANT_ID);
    let message = [method.as_str(), path, &merchant, &timestamp, &expected_md5].join("\n");
    let mut mac = Hmac::<Sha256>::new_from_slice(MERCHANT_SECRET.as_bytes()).unwrap();
    mac.update(message.as_bytes());
    let expected = format!("{}:{}", merchant, STANDARD.encode(mac.finalize().into_bytes()));

    if authorization != expected {
        return Err("signature mismatch".to_string());
    }
    Ok(())
}

async fn handle(
    State(api): State<FakeApi>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    api.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path_and_query: path_and_query.clone(),
        headers: headers.clone(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if let Err(reason) = verify_signature(&method, &path_and_query, &headers, &body) {
        return (
            StatusCode::UNAUTHORIZED,
            error_body("Unauthorized", &reason, "Check merchant credentials"),
        )
            .into_response();
    }

    let segments: Vec<&str> = uri.path().trim_start_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["merchant", "v1", "payments", "999", "refunds"]) => (
            StatusCode::BAD_REQUEST,
            error_body("Error", "Refund amount exceeds payment", "Lower the amount"),
        )
            .into_response(),
        ("POST", ["merchant", "v1", "payments", "998", "refunds"]) => {
            StatusCode::ACCEPTED.into_response()
        }
        ("POST", ["merchant", "v1", "payments", _, "refunds"]) => (
            StatusCode::ACCEPTED,
            [(
                header::LOCATION,
                "https://api.paytrail.com/merchant/v1/refunds/9f3c1a77b2",
            )],
        )
            .into_response(),
        ("DELETE", ["merchant", "v1", "refunds", _]) => StatusCode::NO_CONTENT.into_response(),
        ("GET", ["merchant", "v1", "refunds", token]) => (
            StatusCode::OK,
            json!({ "refund": token, "status": "ok" }).to_string(),
        )
            .into_response(),
        ("GET", ["merchant", "v1", "settlements"]) => {
            (StatusCode::OK, uri.query().unwrap_or_default().to_string()).into_response()
        }
        ("GET", ["merchant", "v1", "settlements", id]) => (
            StatusCode::OK,
            json!({ "settlement": id }).to_string(),
        )
            .into_response(),
        ("GET", ["merchant", "v1", "payments", "missing"]) => {
            StatusCode::NOT_FOUND.into_response()
        }
        ("GET", ["merchant", "v1", "payments", id]) => (
            StatusCode::OK,
            json!({ "payment": id, "status": "paid" }).to_string(),
        )
            .into_response(),
        ("GET", ["merchant", "v1", "payments"]) => (
            StatusCode::OK,
            json!([{ "orderNumber": uri.query().unwrap_or_default() }]).to_string(),
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, "no such endpoint").into_response(),
    }
}

async fn spawn_fake_api() -> (SocketAddr, FakeApi) {
    let api = FakeApi::default();
    let app = Router::new().fallback(handle).with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, api)
}

fn client(addr: SocketAddr, secret: &str) -> MerchantApi {
    let transport = ReqwestTransport::new(&HttpConfig::default()).unwrap();
    MerchantApi::new(Credentials::new(MERCHANT_ID, secret), Arc::new(transport))
        .with_base_url(format!("http://{}/", addr))
}

// =============================================================================
// Refunds
// =============================================================================

#[tokio::test]
async fn create_refund_returns_token_from_location() {
    let (addr, fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let rows = [Row { title: "foo", amount: 10 }];
    let outcome = api
        .create_refund(123, &rows, "foo@bar.com", Some("https://notifyUrl.com"))
        .await;

    assert_eq!(outcome, Outcome::success("9f3c1a77b2"));

    let request = fake.last();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path_and_query, "/merchant/v1/payments/123/refunds");
    assert_eq!(
        request.body,
        r#"{"rows":[{"title":"foo","amount":10}],"email":"foo@bar.com","notifyUrl":"https://notifyUrl.com"}"#
    );
    assert_eq!(request.header("content-md5"), Some("9W/ZUbcicvBqkI7sCu5WXQ=="));
    assert_eq!(request.header("refund-origin"), Some("internal"));
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn create_refund_without_notify_url_omits_field() {
    let (addr, fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let rows = [Row { title: "foo", amount: 10 }];
    let outcome = api.create_refund(123, &rows, "foo@bar.com", None).await;

    assert!(outcome.is_success());
    assert!(!fake.last().body.contains("notifyUrl"));
}

#[tokio::test]
async fn create_refund_reports_api_error_message() {
    let (addr, _fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let rows = [Row { title: "foo", amount: 100_000 }];
    let outcome = api.create_refund(999, &rows, "foo@bar.com", None).await;

    assert_eq!(
        outcome,
        Outcome::failed("Error: Refund amount exceeds payment, Lower the amount")
    );
}

#[tokio::test]
async fn create_refund_without_location_is_failed() {
    let (addr, _fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let rows = [Row { title: "foo", amount: 10 }];
    let outcome = api.create_refund(998, &rows, "foo@bar.com", None).await;

    assert!(!outcome.is_success());
    assert!(outcome.error().unwrap().contains("Location"));
}

#[tokio::test]
async fn cancel_refund_accepts_no_content() {
    let (addr, fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let outcome = api.cancel_refund("9f3c1a77b2").await;

    assert_eq!(outcome, Outcome::success(""));
    let request = fake.last();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.path_and_query, "/merchant/v1/refunds/9f3c1a77b2");
    assert_eq!(request.header("content-md5"), Some("1B2M2Y8AsgTpgAmY7PhCfg=="));
}

#[tokio::test]
async fn get_refund_details_returns_body() {
    let (addr, _fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let outcome = api.get_refund_details("9f3c1a77b2").await;

    let content: serde_json::Value = serde_json::from_str(outcome.content().unwrap()).unwrap();
    assert_eq!(content["refund"], "9f3c1a77b2");
}

// =============================================================================
// Settlements
// =============================================================================

#[tokio::test]
async fn get_settlements_sends_both_dates() {
    let (addr, _fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let outcome = api
        .get_settlements(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 31),
        )
        .await;

    assert_eq!(outcome, Outcome::success("fromDate=2023-01-01&toDate=2023-01-31"));
}

#[tokio::test]
async fn get_settlements_defaults_end_date_to_today() {
    let (addr, _fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let today = Utc::now().date_naive();
    let outcome = api
        .get_settlements(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), None)
        .await;

    let query = outcome.content().unwrap().to_string();
    assert!(query.starts_with("fromDate=2023-01-01&toDate="));
    // The request may straddle midnight UTC.
    let to_date = NaiveDate::parse_from_str(&query["fromDate=2023-01-01&toDate=".len()..], "%Y-%m-%d").unwrap();
    assert!(to_date == today || to_date == today.succ_opt().unwrap());
}

#[tokio::test]
async fn get_settlement_details_returns_body() {
    let (addr, fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let outcome = api.get_settlement_details("st-42").await;

    assert_eq!(outcome, Outcome::success(r#"{"settlement":"st-42"}"#));
    assert_eq!(fake.last().path_and_query, "/merchant/v1/settlements/st-42");
}

// =============================================================================
// Payments
// =============================================================================

#[tokio::test]
async fn get_payment_details_returns_body() {
    let (addr, fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let outcome = api.get_payment_details("123").await;

    let content: serde_json::Value = serde_json::from_str(outcome.content().unwrap()).unwrap();
    assert_eq!(content["payment"], "123");
    let request = fake.last();
    assert_eq!(request.method, Method::GET);
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn get_payment_details_not_found_with_empty_body() {
    let (addr, _fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let outcome = api.get_payment_details("missing").await;

    assert_eq!(outcome, Outcome::failed("Unexpected HTTP status 404"));
}

#[tokio::test]
async fn get_payments_queries_by_order_number() {
    let (addr, fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    let outcome = api.get_payments("order-77").await;

    assert!(outcome.is_success());
    assert_eq!(
        fake.last().path_and_query,
        "/merchant/v1/payments?order_number=order-77"
    );
}

// =============================================================================
// Signing and transport failures
// =============================================================================

#[tokio::test]
async fn every_request_carries_verifiable_signature() {
    let (addr, fake) = spawn_fake_api().await;
    let api = client(addr, MERCHANT_SECRET);

    api.get_payment_details("1").await;
    api.get_refund_details("2").await;
    api.cancel_refund("3").await;

    let requests = fake.requests();
    assert_eq!(requests.len(), 3);
    for request in requests {
        let authorization = request.header("authorization").unwrap();
        assert!(authorization.starts_with("PaytrailMerchantAPI 13466:"));
        assert!(request.header("timestamp").unwrap().ends_with("+00:00"));
    }
}

#[tokio::test]
async fn wrong_secret_is_rejected_by_server() {
    let (addr, _fake) = spawn_fake_api().await;
    let api = client(addr, "not-the-secret");

    let outcome = api.get_payment_details("123").await;

    assert_eq!(
        outcome,
        Outcome::failed("Unauthorized: signature mismatch, Check merchant credentials")
    );
}

#[tokio::test]
async fn connection_refused_is_failed() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(addr, MERCHANT_SECRET);
    let outcome = api.get_payment_details("123").await;

    assert!(!outcome.is_success());
    assert!(!outcome.error().unwrap().is_empty());
}
