//! Passcode record entity for SMS-based login.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for passcodes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// One outstanding passcode for a subject.
///
/// The subject store holds at most one record per phone number; issuing a
/// new code overwrites whatever was there. A record is consumed by
/// deletion - on successful verification, on expiry, or when the attempt
/// budget runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Normalized phone number this code was sent to
    pub phone: String,

    /// The numeric passcode
    pub code: String,

    /// Number of verification attempts made
    pub attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a new record for a freshly generated code.
    ///
    /// # Arguments
    ///
    /// * `phone` - Normalized phone number (`+` plus digits)
    /// * `code` - The generated passcode
    /// * `validity` - How long the code stays verifiable
    pub fn new(phone: String, code: String, validity: Duration) -> Self {
        let now = Utc::now();
        Self {
            phone,
            code,
            attempts: 0,
            created_at: now,
            expires_at: now + validity,
        }
    }

    /// Checks whether the record has expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks whether the record has expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the attempt budget still has room.
    pub fn has_attempts_left(&self, max_attempts: i32) -> bool {
        self.attempts < max_attempts
    }

    /// Remaining verification attempts (never negative).
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.attempts).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_validity(minutes: i64) -> OtpRecord {
        OtpRecord::new(
            "+9876543210".to_string(),
            "123456".to_string(),
            Duration::minutes(minutes),
        )
    }

    #[test]
    fn new_record_starts_fresh() {
        let record = record_with_validity(DEFAULT_EXPIRATION_MINUTES);
        assert_eq!(record.phone, "+9876543210");
        assert_eq!(record.attempts, 0);
        assert!(!record.is_expired());
        assert!(record.has_attempts_left(MAX_ATTEMPTS));
        assert_eq!(
            record.expires_at,
            record.created_at + Duration::minutes(DEFAULT_EXPIRATION_MINUTES)
        );
    }

    #[test]
    fn expiry_is_strict_inequality() {
        let record = record_with_validity(5);
        // Not expired exactly at the boundary
        assert!(!record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn remaining_attempts_never_goes_negative() {
        let mut record = record_with_validity(5);
        assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 3);

        record.attempts = 2;
        assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 1);
        assert!(record.has_attempts_left(MAX_ATTEMPTS));

        record.attempts = 5;
        assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 0);
        assert!(!record.has_attempts_left(MAX_ATTEMPTS));
    }

    #[test]
    fn serialization_round_trip() {
        let record = record_with_validity(5);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: OtpRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
