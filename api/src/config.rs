//! API process configuration
//!
//! Thin wrapper over the shared config types: everything comes from
//! environment variables (via `.env` in development), with the SMS
//! provider selection layered on top.

use ce_shared::config::AppConfig;

/// Runtime configuration for the API process
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Shared application configuration
    pub app: AppConfig,
    /// SMS provider name ("mock" or "twilio")
    pub sms_provider: String,
}

impl ApiConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            app: AppConfig::from_env(),
            sms_provider: std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
        }
    }
}
