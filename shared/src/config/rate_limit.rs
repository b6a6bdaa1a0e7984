//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Per-IP rate limiting configuration
///
/// Both limits share the same fixed window. The OTP limit applies to the
/// send endpoint only; the general limit applies across all routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Max OTP send requests per IP per window
    #[serde(default = "default_otp_requests")]
    pub max_otp_requests: u32,

    /// Max requests per IP per window across all routes
    #[serde(default = "default_general_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            window_seconds: default_window_seconds(),
            max_otp_requests: default_otp_requests(),
            max_requests: default_general_requests(),
        }
    }
}

impl RateLimitConfig {
    /// Load from `RATE_LIMIT_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enabled),
            window_seconds: std::env::var("RATE_LIMIT_WINDOW_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.window_seconds),
            max_otp_requests: std::env::var("RATE_LIMIT_MAX_OTP_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_otp_requests),
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_requests),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_window_seconds() -> u64 {
    900 // 15 minutes
}

fn default_otp_requests() -> u32 {
    5
}

fn default_general_requests() -> u32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fifteen_minute_window() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.window_seconds, 900);
        assert_eq!(config.max_otp_requests, 5);
        assert_eq!(config.max_requests, 100);
    }
}
