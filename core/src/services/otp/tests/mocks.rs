//! Mock implementations for testing the OTP service

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::DeliveryError;
use crate::services::otp::traits::SmsChannel;

/// Mock SMS channel that records the last code sent per phone number
pub struct MockSmsChannel {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub fail_with: Option<DeliveryError>,
    counter: Mutex<u64>,
}

impl MockSmsChannel {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            fail_with: None,
            counter: Mutex::new(0),
        }
    }

    pub fn failing_with(error: DeliveryError) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            fail_with: Some(error),
            counter: Mutex::new(0),
        }
    }

    pub fn sent_code(&self, phone: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(phone).cloned()
    }
}

#[async_trait]
impl SmsChannel for MockSmsChannel {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, DeliveryError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(phone.to_string(), code.to_string());
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        Ok(format!("mock-msg-{}", counter))
    }
}
