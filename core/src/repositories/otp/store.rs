//! Trait for subject store integration

use async_trait::async_trait;

use crate::domain::entities::otp_record::OtpRecord;

/// Mutable mapping from normalized phone number to its outstanding record.
///
/// The store owns every record exclusively; callers never retain one past
/// a single operation. Each method is atomic on its own, but the store
/// makes no cross-call guarantees - `OtpService` serializes its
/// read-modify-write sequences behind one lock. Implementations report
/// failures as strings so a durable backend can be swapped in without
/// touching the service.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Fetch the outstanding record for a subject, if any
    async fn get(&self, phone: &str) -> Result<Option<OtpRecord>, String>;

    /// Insert or replace the record for a subject
    async fn put(&self, phone: &str, record: OtpRecord) -> Result<(), String>;

    /// Remove the record for a subject (no-op when absent)
    async fn delete(&self, phone: &str) -> Result<(), String>;

    /// Snapshot all `(subject, record)` pairs, for sweeping
    async fn entries(&self) -> Result<Vec<(String, OtpRecord)>, String>;
}
