//! Request and response bodies for the OTP endpoints
//!
//! Field names are camelCase on the wire to match the portal front-end.
//! Request fields are optional so the handlers can report missing input
//! with the portal's exact error strings instead of a framework 400.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone_number: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    pub phone_number: String,
    /// Human-readable validity window, e.g. "5 minutes"
    pub expires_in: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub phone_number: String,
}

/// Failure envelope shared by both endpoints
#[derive(Debug, Clone, Serialize)]
pub struct OtpFailureResponse {
    pub success: bool,
    pub error: String,
}

impl OtpFailureResponse {
    pub fn new(error: impl ToString) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}
