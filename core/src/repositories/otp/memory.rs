//! In-memory subject store
//!
//! Process-local map with no persistence across restarts - the store the
//! demo portal actually runs with. Kept behind [`OtpStore`] so the
//! services never see the map directly.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::otp_record::OtpRecord;

use super::store::OtpStore;

/// Subject store backed by a mutex-guarded `HashMap`
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding records (test and sweeper instrumentation)
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(&self, phone: &str) -> Result<Option<OtpRecord>, String> {
        Ok(self.records.lock().await.get(phone).cloned())
    }

    async fn put(&self, phone: &str, record: OtpRecord) -> Result<(), String> {
        self.records.lock().await.insert(phone.to_string(), record);
        Ok(())
    }

    async fn delete(&self, phone: &str) -> Result<(), String> {
        self.records.lock().await.remove(phone);
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<(String, OtpRecord)>, String> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .map(|(phone, record)| (phone.clone(), record.clone()))
            .collect())
    }
}
