//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `paytrail` - Signed Merchant API client
//! - `transport` - HTTP transports (reqwest, scripted mock)

pub mod paytrail;
pub mod transport;

pub use paytrail::MerchantApi;
pub use transport::{MockTransport, ReqwestTransport};
