//! Merchant credentials value object.

use secrecy::{ExposeSecret, SecretString};

/// Merchant identifier and shared secret used to sign every request.
///
/// The secret is held in a [`SecretString`], so `Debug` output redacts it.
/// Credentials are immutable once constructed.
#[derive(Debug, Clone)]
pub struct Credentials {
    id: String,
    secret: SecretString,
}

impl Credentials {
    /// Creates credentials from a merchant id and its shared secret.
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: SecretString::new(secret.into()),
        }
    }

    /// Creates credentials from an already wrapped secret.
    pub fn from_secret(id: impl Into<String>, secret: SecretString) -> Self {
        Self {
            id: id.into(),
            secret,
        }
    }

    /// Returns the merchant identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the raw secret bytes for keying the HMAC.
    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}
