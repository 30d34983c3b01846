//! Merchant credentials and API endpoint configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Merchant configuration (Paytrail)
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantConfig {
    /// Merchant identifier
    pub id: String,

    /// Shared secret used to sign requests
    pub secret: SecretString,

    /// API origin, without trailing path
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl MerchantConfig {
    /// Validate merchant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MERCHANT__ID"));
        }
        if self.secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("MERCHANT__SECRET"));
        }
        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(ValidationError::InvalidApiUrl);
        }
        Ok(())
    }
}

fn default_api_url() -> String {
    crate::adapters::paytrail::DEFAULT_API_URL.to_string()
}
