//! Paytrail Merchant API adapter.
//!
//! - Request signing (HMAC-SHA256 over a fixed template, MD5 body digest)
//! - Response classification into `Outcome`
//! - The `MerchantApi` facade, one method per remote operation
//!
//! # Security
//!
//! - The merchant secret is held in `secrecy::SecretString` and never logged
//! - Each request is signed with a fresh timestamp

pub mod classifier;
mod endpoints;
mod merchant_api;
mod signer;

pub use merchant_api::{MerchantApi, DEFAULT_API_URL};
pub use signer::{
    RequestSigner, SignedRequest, SigningError, AUTHORIZATION_HEADER, AUTHORIZATION_SCHEME,
    CONTENT_MD5_HEADER, TIMESTAMP_HEADER,
};
