//! Common error response structures shared by the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generic error envelope for non-domain failures (unmatched routes,
/// unhandled faults). Domain failures use the `{success, error}` shape
/// defined by the OTP route DTOs instead.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error description
    pub error: String,
    /// Optional human-readable detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Timestamp when the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ErrorResponse {
    /// Create a bare error response
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: None,
            timestamp: None,
        }
    }

    /// Attach a detail message
    pub fn with_message(mut self, message: impl ToString) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Attach the current timestamp
    pub fn with_timestamp(mut self) -> Self {
        self.timestamp = Some(Utc::now());
        self
    }
}
