//! OTP issuance configuration module

use serde::{Deserialize, Serialize};

/// Configuration for passcode generation, expiry and verification
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Minutes before an issued code expires
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,

    /// Maximum verification attempts per code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,

    /// Seconds between expiry sweeps of the subject store
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            expiry_minutes: default_expiry_minutes(),
            max_attempts: default_max_attempts(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl OtpConfig {
    /// Load from `OTP_*` environment variables, defaulting anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: env_parse("OTP_CODE_LENGTH", defaults.code_length),
            expiry_minutes: env_parse("OTP_EXPIRY_MINUTES", defaults.expiry_minutes),
            max_attempts: env_parse("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            sweep_interval_seconds: env_parse(
                "OTP_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
        }
    }

    /// The validity window in whole seconds
    pub fn expiry_seconds(&self) -> i64 {
        self.expiry_minutes * 60
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_code_length() -> usize {
    6
}

fn default_expiry_minutes() -> i64 {
    5
}

fn default_max_attempts() -> i32 {
    3
}

fn default_sweep_interval() -> u64 {
    300
}
