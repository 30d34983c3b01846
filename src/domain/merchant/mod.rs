//! Merchant module - credentials and call outcomes.

mod credentials;
mod outcome;
mod settlement;

pub use credentials::Credentials;
pub use outcome::Outcome;
pub use settlement::SettlementRange;
