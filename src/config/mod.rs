//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PAYTRAIL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use paytrail_merchant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Merchant API at {}", config.merchant.api_url);
//! ```

mod error;
mod http;
mod logging;
mod merchant;

pub use error::{ConfigError, ValidationError};
pub use http::HttpConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use merchant::MerchantConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Merchant credentials and API origin
    pub merchant: MerchantConfig,

    /// HTTP client timeouts
    #[serde(default)]
    pub http: HttpConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAYTRAIL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYTRAIL__MERCHANT__ID=13466` -> `merchant.id = "13466"`
    /// - `PAYTRAIL__HTTP__TIMEOUT_SECS=60` -> `http.timeout_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYTRAIL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.merchant.validate()?;
        self.http.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
