//! # Infrastructure Layer
//!
//! Concrete delivery-channel implementations for the Campus Eats OTP
//! service. The core crate defines the `SmsChannel` seam; this crate
//! provides the Twilio-backed production channel and a console mock for
//! development and tests.
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS channel (default)

use thiserror::Error;

/// SMS channel module - external SMS providers
pub mod sms;

pub use sms::{create_sms_channel, MockSmsChannel};
#[cfg(feature = "twilio-sms")]
pub use sms::{TwilioConfig, TwilioSmsChannel};

/// Errors raised while constructing infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS channel initialization failure
    #[error("SMS error: {0}")]
    Sms(String),
}
