//! Pure issue/attempt decision functions
//!
//! Both functions take `now` explicitly so the ordering rules can be
//! tested without a real clock. The check order is load-bearing:
//! existence, then liveness, then attempts for issuance; expiry strictly
//! before attempts for verification. An expired or attempts-exhausted
//! record never blocks reissuance.

use chrono::{DateTime, Utc};

use crate::domain::entities::otp_record::OtpRecord;

/// Outcome of asking whether a new code may be issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueDecision {
    Allow,
    /// A live code is still outstanding; retry once it expires
    Deny { retry_after_seconds: i64 },
}

/// Outcome of asking whether a verification attempt may proceed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptDecision {
    Allow,
    /// Caller must delete the record and report expiry
    Expired,
    /// Caller must delete the record and report exhaustion
    AttemptsExhausted,
}

/// Decide whether a new code may be issued for a subject.
///
/// Denies only when an existing record is present, has attempts left, and
/// has not yet expired. `retry_after_seconds` is the ceiling of the time
/// left on the outstanding code.
pub fn may_issue(
    existing: Option<&OtpRecord>,
    now: DateTime<Utc>,
    max_attempts: i32,
) -> IssueDecision {
    let Some(record) = existing else {
        return IssueDecision::Allow;
    };
    if !record.has_attempts_left(max_attempts) {
        return IssueDecision::Allow;
    }
    let time_left = seconds_until(record.expires_at, now);
    if time_left > 0 {
        IssueDecision::Deny {
            retry_after_seconds: time_left,
        }
    } else {
        IssueDecision::Allow
    }
}

/// Decide whether a verification attempt against a record may proceed.
///
/// The expiry check comes first: an expired record reports `Expired` even
/// when its attempt budget is also exhausted.
pub fn may_attempt(record: &OtpRecord, now: DateTime<Utc>, max_attempts: i32) -> AttemptDecision {
    if record.is_expired_at(now) {
        return AttemptDecision::Expired;
    }
    if !record.has_attempts_left(max_attempts) {
        return AttemptDecision::AttemptsExhausted;
    }
    AttemptDecision::Allow
}

/// Whole seconds until `deadline`, rounded up; zero when already past.
fn seconds_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (deadline - now).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis + 999) / 1000
    }
}
