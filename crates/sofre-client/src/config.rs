//! # Client Configuration
//!
//! Connection settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SOFRE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::time::Duration;

/// Client configuration.
///
/// ## Fields
/// Defaults target a backend on localhost for development. Production
/// deployments should configure these properly.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the restaurant backend, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Site-wide tax percent override. `None` keeps each channel's
    /// default profile.
    pub tax_percent_override: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout: Duration::from_secs(15),
            user_agent: concat!("sofre-client/", env!("CARGO_PKG_VERSION")).to_string(),
            tax_percent_override: None,
        }
    }
}

impl ClientConfig {
    /// Creates a ClientConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SOFRE_BACKEND_URL`: Base URL of the backend
    /// - `SOFRE_REQUEST_TIMEOUT_SECS`: Per-request timeout in seconds
    /// - `SOFRE_TAX_PERCENT`: Whole-percent tax override for all channels
    pub fn from_env() -> Self {
        let mut config = ClientConfig::default();

        if let Ok(base_url) = std::env::var("SOFRE_BACKEND_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(timeout_str) = std::env::var("SOFRE_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout_str.parse::<u64>() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(tax_str) = std::env::var("SOFRE_TAX_PERCENT") {
            if let Ok(pct) = tax_str.parse::<u32>() {
                config.tax_percent_override = Some(pct);
            }
        }

        config
    }
}
