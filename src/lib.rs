//! Paytrail Merchant - client SDK for the Paytrail Merchant API
//!
//! Signs each request with the merchant credentials, sends it over a
//! pluggable transport and reduces the response to an [`Outcome`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use paytrail_merchant::{Credentials, MerchantApi, ReqwestTransport};
//! use paytrail_merchant::config::HttpConfig;
//!
//! # async fn run() -> Result<(), paytrail_merchant::ports::TransportError> {
//! let transport = ReqwestTransport::new(&HttpConfig::default())?;
//! let api = MerchantApi::new(
//!     Credentials::new("13466", "6pKF4jkv97zmqBJ3ZL8gUw5DfT2NMQ"),
//!     Arc::new(transport),
//! );
//!
//! let outcome = api.get_payment_details("123").await;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use adapters::{MerchantApi, MockTransport, ReqwestTransport};
pub use domain::merchant::{Credentials, Outcome, SettlementRange};
