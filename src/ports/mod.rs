//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the SDK core and the outside world. Adapters implement these ports.
//!
//! - `MerchantTransport` - Sends one signed request, returns any response

mod merchant_transport;

pub use merchant_transport::{
    HttpMethod, MerchantTransport, OutgoingRequest, TransportError, TransportResponse,
};
