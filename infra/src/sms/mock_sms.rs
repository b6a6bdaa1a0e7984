//! Mock SMS channel
//!
//! Logs outgoing passcodes to the console instead of sending them. Used
//! in development (`SMS_PROVIDER=mock`, the default) and in tests, which
//! read the recorded messages back instead of owning a phone.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use ce_core::errors::DeliveryError;
use ce_core::services::otp::SmsChannel;
use ce_shared::utils::phone::{is_normalized, mask_phone};

use super::otp_message;

/// A message the mock channel "delivered"
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub phone: String,
    pub code: String,
    pub body: String,
}

/// Mock SMS channel for development and testing
pub struct MockSmsChannel {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Every message sent, oldest first
    messages: Arc<Mutex<Vec<SentMessage>>>,
    /// Whether to simulate delivery failures
    fail_with: Option<DeliveryError>,
    /// Whether to print messages to the console
    console_output: bool,
    /// Expiry minutes quoted in the message body
    expiry_minutes: i64,
}

impl MockSmsChannel {
    pub fn new(expiry_minutes: i64) -> Self {
        Self::with_options(expiry_minutes, true, None)
    }

    /// Create a mock channel with configurable options
    pub fn with_options(
        expiry_minutes: i64,
        console_output: bool,
        fail_with: Option<DeliveryError>,
    ) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            messages: Arc::new(Mutex::new(Vec::new())),
            fail_with,
            console_output,
            expiry_minutes,
        }
    }

    /// Silent channel for tests
    pub fn quiet(expiry_minutes: i64) -> Self {
        Self::with_options(expiry_minutes, false, None)
    }

    /// Total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// The most recent code sent to a phone number
    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.phone == phone)
            .map(|m| m.code.clone())
    }

    /// Snapshot of everything sent so far
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsChannel for MockSmsChannel {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, DeliveryError> {
        if !is_normalized(phone) {
            warn!(
                "Mock SMS channel refusing malformed phone: {}",
                mask_phone(phone)
            );
            return Err(DeliveryError::InvalidNumber);
        }

        if let Some(error) = &self.fail_with {
            warn!(
                "Mock SMS channel simulating failure for phone: {}",
                mask_phone(phone)
            );
            return Err(error.clone());
        }

        let body = otp_message(code, self.expiry_minutes);
        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        self.messages.lock().unwrap().push(SentMessage {
            phone: phone.to_string(),
            code: code.to_string(),
            body: body.clone(),
        });

        if self.console_output {
            // Development aid: the mock IS the delivery channel, so the
            // code is visible here and nowhere else
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS CHANNEL - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", phone);
            println!("Message ID: {}", message_id);
            println!("Content: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_channel",
            provider = "mock",
            phone = %mask_phone(phone),
            message_id = %message_id,
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_records_the_message() {
        let channel = MockSmsChannel::quiet(5);
        let message_id = channel.send_otp("+9876543210", "123456").await.unwrap();

        assert!(message_id.starts_with("mock_"));
        assert_eq!(channel.message_count(), 1);
        assert_eq!(
            channel.last_code_for("+9876543210").as_deref(),
            Some("123456")
        );
    }

    #[tokio::test]
    async fn last_code_tracks_the_most_recent_send() {
        let channel = MockSmsChannel::quiet(5);
        channel.send_otp("+9876543210", "111111").await.unwrap();
        channel.send_otp("+9876543210", "222222").await.unwrap();

        assert_eq!(
            channel.last_code_for("+9876543210").as_deref(),
            Some("222222")
        );
        assert_eq!(channel.message_count(), 2);
    }

    #[tokio::test]
    async fn malformed_phone_is_refused() {
        let channel = MockSmsChannel::quiet(5);
        let result = channel.send_otp("9876543210", "123456").await;
        assert_eq!(result.unwrap_err(), DeliveryError::InvalidNumber);
        assert_eq!(channel.message_count(), 0);
    }

    #[tokio::test]
    async fn simulated_failure_surfaces_the_configured_error() {
        let channel =
            MockSmsChannel::with_options(5, false, Some(DeliveryError::PermissionDenied));
        let result = channel.send_otp("+9876543210", "123456").await;
        assert_eq!(result.unwrap_err(), DeliveryError::PermissionDenied);
    }
}
