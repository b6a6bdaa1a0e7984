//! Configuration for the OTP service

use crate::domain::entities::otp_record::{
    CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of digits in a generated code
    pub code_length: usize,
    /// Minutes before an issued code expires
    pub expiration_minutes: i64,
    /// Maximum number of verification attempts allowed
    pub max_attempts: i32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl From<&ce_shared::config::OtpConfig> for OtpServiceConfig {
    fn from(config: &ce_shared::config::OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            expiration_minutes: config.expiry_minutes,
            max_attempts: config.max_attempts,
        }
    }
}
