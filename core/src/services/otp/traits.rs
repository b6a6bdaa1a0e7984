//! Delivery channel seam

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DeliveryError;

/// SMS sending capability the issuer delegates to.
///
/// Implementations live in the infrastructure crate (Twilio, console
/// mock). The channel is the only component allowed to see the plaintext
/// code on its way out.
#[async_trait]
pub trait SmsChannel: Send + Sync {
    /// Send a passcode to a normalized phone number.
    ///
    /// Returns the provider's message reference on success.
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, DeliveryError>;
}

// Forwarding impl so a provider chosen at runtime (`Arc<dyn SmsChannel>`)
// can satisfy the service's generic parameter.
#[async_trait]
impl<T: SmsChannel + ?Sized> SmsChannel for Arc<T> {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, DeliveryError> {
        self.as_ref().send_otp(phone, code).await
    }
}
