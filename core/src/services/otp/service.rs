//! Issuer and verifier over the subject store
//!
//! All store read-modify-write sequences run behind one internal lock, so
//! concurrent issue/verify/sweep calls for the same subject can never
//! interleave and double-count attempts or lose deletes. The SMS call is
//! made after the guard is dropped: the record is stored before delivery
//! is attempted, and a delivery failure leaves it in place.

use std::sync::Arc;

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use tokio::sync::Mutex;

use ce_shared::utils::phone::{mask_phone, normalize_phone};

use crate::errors::{OtpError, OtpResult};
use crate::domain::entities::otp_record::OtpRecord;
use crate::repositories::otp::OtpStore;

use super::config::OtpServiceConfig;
use super::generator::generate_code;
use super::policy::{may_attempt, may_issue, AttemptDecision, IssueDecision};
use super::traits::SmsChannel;
use super::types::IssueOutcome;

/// OTP issuance and verification service
pub struct OtpService<S: SmsChannel, R: OtpStore> {
    /// Delivery channel for outgoing codes
    sms: Arc<S>,
    /// Subject store holding the outstanding records
    store: Arc<R>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Serializes all store read-modify-write sections
    op_lock: Mutex<()>,
}

impl<S: SmsChannel, R: OtpStore> OtpService<S, R> {
    pub fn new(sms: Arc<S>, store: Arc<R>, config: OtpServiceConfig) -> Self {
        Self {
            sms,
            store,
            config,
            op_lock: Mutex::new(()),
        }
    }

    /// Issue a new passcode for a subject and deliver it over SMS.
    ///
    /// The subject is normalized first; issuance is refused while a live,
    /// still-usable code is outstanding. The new record replaces any
    /// stale one before the channel is invoked, and is kept even when
    /// delivery fails - the caller retries after the throttle window.
    pub async fn issue(&self, raw_phone: &str) -> OtpResult<IssueOutcome> {
        let phone = normalize_phone(raw_phone).ok_or(OtpError::InvalidSubject)?;
        let now = Utc::now();

        let code = {
            let _guard = self.op_lock.lock().await;

            let existing = self
                .store
                .get(&phone)
                .await
                .map_err(|e| OtpError::internal(format!("store read failed: {}", e)))?;

            if let IssueDecision::Deny {
                retry_after_seconds,
            } = may_issue(existing.as_ref(), now, self.config.max_attempts)
            {
                tracing::warn!(
                    phone = %mask_phone(&phone),
                    retry_after_seconds,
                    event = "otp_issue_throttled",
                    "Reissue denied while a live code is outstanding"
                );
                return Err(OtpError::Throttled {
                    retry_after_seconds,
                });
            }

            let record = OtpRecord::new(
                phone.clone(),
                generate_code(self.config.code_length),
                Duration::minutes(self.config.expiration_minutes),
            );
            let code = record.code.clone();

            self.store
                .put(&phone, record)
                .await
                .map_err(|e| OtpError::internal(format!("store write failed: {}", e)))?;
            code
        };

        tracing::info!(
            phone = %mask_phone(&phone),
            event = "otp_issued",
            "Stored new passcode for subject"
        );

        let message_id = self.sms.send_otp(&phone, &code).await.map_err(|e| {
            tracing::error!(
                phone = %mask_phone(&phone),
                error = %e,
                event = "otp_delivery_failed",
                "SMS delivery failed; stored code remains valid"
            );
            OtpError::from(e)
        })?;

        tracing::info!(
            phone = %mask_phone(&phone),
            message_id = %message_id,
            event = "otp_sent",
            "Passcode delivered"
        );

        Ok(IssueOutcome {
            phone,
            message_id,
            expires_in_seconds: self.config.expiration_minutes * 60,
        })
    }

    /// Verify a submitted passcode for a subject.
    ///
    /// Every comparison consumes an attempt. The record is deleted on
    /// success, on expiry, and on exhaustion; a plain mismatch writes the
    /// incremented attempt count back.
    pub async fn verify(&self, raw_phone: &str, submitted_code: &str) -> OtpResult<()> {
        let phone = normalize_phone(raw_phone).ok_or(OtpError::InvalidSubject)?;
        let now = Utc::now();

        let _guard = self.op_lock.lock().await;

        let mut record = self
            .store
            .get(&phone)
            .await
            .map_err(|e| OtpError::internal(format!("store read failed: {}", e)))?
            .ok_or(OtpError::NotFound)?;

        match may_attempt(&record, now, self.config.max_attempts) {
            AttemptDecision::Expired => {
                self.delete_record(&phone).await?;
                tracing::info!(
                    phone = %mask_phone(&phone),
                    event = "otp_expired",
                    "Expired passcode removed at verification"
                );
                return Err(OtpError::Expired);
            }
            AttemptDecision::AttemptsExhausted => {
                self.delete_record(&phone).await?;
                tracing::warn!(
                    phone = %mask_phone(&phone),
                    event = "otp_attempts_exhausted",
                    "Attempt budget exhausted; passcode removed"
                );
                return Err(OtpError::AttemptsExhausted);
            }
            AttemptDecision::Allow => {}
        }

        record.attempts += 1;

        if codes_match(&record.code, submitted_code) {
            self.delete_record(&phone).await?;
            tracing::info!(
                phone = %mask_phone(&phone),
                event = "otp_verified",
                "Passcode verified and consumed"
            );
            Ok(())
        } else {
            let remaining_attempts = record.remaining_attempts(self.config.max_attempts);
            self.store
                .put(&phone, record)
                .await
                .map_err(|e| OtpError::internal(format!("store write failed: {}", e)))?;
            tracing::warn!(
                phone = %mask_phone(&phone),
                remaining_attempts,
                event = "otp_mismatch",
                "Passcode mismatch"
            );
            Err(OtpError::InvalidCode { remaining_attempts })
        }
    }

    /// Delete every expired record from the store; returns the count.
    ///
    /// Correctness of expiry is already enforced at read time - this only
    /// bounds memory growth from abandoned codes.
    pub async fn sweep_expired(&self) -> OtpResult<usize> {
        let now = Utc::now();
        let _guard = self.op_lock.lock().await;

        let entries = self
            .store
            .entries()
            .await
            .map_err(|e| OtpError::internal(format!("store scan failed: {}", e)))?;

        let mut removed = 0;
        for (phone, record) in entries {
            if record.is_expired_at(now) {
                self.store
                    .delete(&phone)
                    .await
                    .map_err(|e| OtpError::internal(format!("store delete failed: {}", e)))?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn delete_record(&self, phone: &str) -> OtpResult<()> {
        self.store
            .delete(phone)
            .await
            .map_err(|e| OtpError::internal(format!("store delete failed: {}", e)))
    }
}

/// Exact string equality without early exit on the first differing byte.
fn codes_match(stored: &str, submitted: &str) -> bool {
    stored.len() == submitted.len() && constant_time_eq(stored.as_bytes(), submitted.as_bytes())
}
