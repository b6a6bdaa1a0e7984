//! Types for OTP service results

/// Result of a successful issuance
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// Normalized phone number the code was sent to
    pub phone: String,
    /// The delivery channel's message reference
    pub message_id: String,
    /// Validity window of the issued code, in seconds
    pub expires_in_seconds: i64,
}
