//! SMS channel module
//!
//! Implementations of the core `SmsChannel` trait:
//!
//! - **Mock**: console output for development and tests
//! - **Twilio**: production SMS via the Twilio API (feature-gated)
//!
//! Phone numbers are masked in logs; the plaintext code only ever appears
//! in the outgoing message body.

use std::sync::Arc;

use ce_core::services::otp::SmsChannel;
use ce_shared::config::OtpConfig;

pub mod mock_sms;

#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use mock_sms::MockSmsChannel;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsChannel};

/// Standard message body for an outgoing passcode
pub(crate) fn otp_message(code: &str, expiry_minutes: i64) -> String {
    format!(
        "Your Campus Eats verification code is: {}. This code expires in {} minutes.",
        code, expiry_minutes
    )
}

/// Create an SMS channel for the given provider name.
///
/// Unknown providers and Twilio initialization failures fall back to the
/// mock channel so a development environment always starts.
pub fn create_sms_channel(provider: &str, otp_config: &OtpConfig) -> Arc<dyn SmsChannel> {
    match provider {
        "mock" => Arc::new(MockSmsChannel::new(otp_config.expiry_minutes)),
        #[cfg(feature = "twilio-sms")]
        "twilio" => match TwilioSmsChannel::from_env(otp_config.expiry_minutes) {
            Ok(channel) => Arc::new(channel),
            Err(e) => {
                tracing::error!("Failed to initialize Twilio SMS channel: {}", e);
                tracing::warn!("Falling back to mock SMS channel");
                Arc::new(MockSmsChannel::new(otp_config.expiry_minutes))
            }
        },
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                provider
            );
            Arc::new(MockSmsChannel::new(otp_config.expiry_minutes))
        }
    }
}
