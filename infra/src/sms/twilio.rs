//! Twilio SMS channel
//!
//! Sends passcodes through the Twilio API and maps the provider's error
//! codes onto the core delivery taxonomy:
//!
//! - `21211` - invalid phone number
//! - `21614` - not a mobile number
//! - `21408` - permission to send to this region denied
//!
//! Anything else is reported as a generic delivery failure; the detail is
//! logged, never shown to the caller.

use async_trait::async_trait;
use tracing::{error, info};
use twilio::{Client, OutboundMessage};

use ce_core::errors::DeliveryError;
use ce_core::services::otp::SmsChannel;
use ce_shared::utils::phone::mask_phone;

use crate::InfrastructureError;

use super::otp_message;

/// Twilio SMS channel configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
}

impl TwilioConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER")
            .map_err(|_| InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
        })
    }
}

/// Twilio-backed SMS channel
pub struct TwilioSmsChannel {
    client: Client,
    config: TwilioConfig,
    expiry_minutes: i64,
}

impl TwilioSmsChannel {
    /// Create a new Twilio SMS channel
    pub fn new(config: TwilioConfig, expiry_minutes: i64) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS channel initialized with from number: {}",
            mask_phone(&config.from_number)
        );

        Self {
            client,
            config,
            expiry_minutes,
        }
    }

    /// Create from environment variables
    pub fn from_env(expiry_minutes: i64) -> Result<Self, InfrastructureError> {
        let config = TwilioConfig::from_env()?;
        Ok(Self::new(config, expiry_minutes))
    }
}

#[async_trait]
impl SmsChannel for TwilioSmsChannel {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, DeliveryError> {
        let body = otp_message(code, self.expiry_minutes);
        let message = OutboundMessage::new(&self.config.from_number, phone, &body);

        match self.client.send_message(message).await {
            Ok(response) => {
                info!(
                    "SMS sent successfully to {} with SID: {}",
                    mask_phone(phone),
                    response.sid
                );
                Ok(response.sid)
            }
            Err(e) => {
                let detail = e.to_string();
                error!(
                    "Twilio send to {} failed: {}",
                    mask_phone(phone),
                    detail
                );
                Err(classify_twilio_error(&detail))
            }
        }
    }
}

/// Map a Twilio error message onto the delivery taxonomy.
///
/// The crate surfaces provider errors as text, so classification goes by
/// the embedded numeric code.
fn classify_twilio_error(detail: &str) -> DeliveryError {
    if detail.contains("21211") {
        DeliveryError::InvalidNumber
    } else if detail.contains("21614") {
        DeliveryError::NotMobile
    } else if detail.contains("21408") {
        DeliveryError::PermissionDenied
    } else {
        DeliveryError::Failed
    }
}
