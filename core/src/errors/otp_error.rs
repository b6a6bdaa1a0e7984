//! OTP error taxonomy
//!
//! Every variant's `Display` text is the user-visible reason the HTTP
//! layer puts into its `{success: false, error}` envelope; `Internal`
//! detail is for server-side logs only and must never reach clients.

use thiserror::Error;

/// Result alias for OTP service operations
pub type OtpResult<T> = Result<T, OtpError>;

/// Failures of passcode issuance and verification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// The raw subject did not normalize to a 10-15 digit phone number
    #[error("Invalid phone number format")]
    InvalidSubject,

    /// A still-live, still-usable code blocks reissuance until it expires
    #[error("Please wait {retry_after_seconds} seconds before requesting a new OTP")]
    Throttled { retry_after_seconds: i64 },

    /// The delivery channel could not send the code
    #[error(transparent)]
    DeliveryFailed(#[from] DeliveryError),

    /// No outstanding code for this subject
    #[error("No OTP found for this phone number. Please request a new OTP.")]
    NotFound,

    /// The outstanding code's validity window has passed
    #[error("OTP has expired. Please request a new OTP.")]
    Expired,

    /// The attempt budget for the outstanding code is used up
    #[error("Maximum verification attempts exceeded. Please request a new OTP.")]
    AttemptsExhausted,

    /// The submitted code did not match
    #[error("Invalid OTP. {remaining_attempts} attempts remaining.")]
    InvalidCode { remaining_attempts: i32 },

    /// Unexpected fault (store failure etc.); detail stays server-side
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl OtpError {
    /// Build an `Internal` error from any displayable cause
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }
}

/// Channel-specific delivery failures, mapped from provider error codes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Invalid phone number format")]
    InvalidNumber,

    #[error("Phone number is not a valid mobile number")]
    NotMobile,

    #[error("Permission to send SMS to this number denied")]
    PermissionDenied,

    #[error("Failed to send SMS. Please try again.")]
    Failed,
}
