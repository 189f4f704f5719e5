use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{BusinessStore, StoreError};
use crate::domain::BusinessPaymentUpdate;

/// In-memory business store used by tests in place of Firestore.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, BusinessPaymentUpdate>>,
    writes: AtomicUsize,
    fail: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes all fail, for exercising the retryable-error
    /// path.
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn get(&self, business_id: &str) -> Option<BusinessPaymentUpdate> {
        self.records
            .lock()
            .expect("store lock poisoned")
            .get(business_id)
            .cloned()
    }

    /// Number of writes applied so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BusinessStore for MemoryStore {
    async fn apply_payment(
        &self,
        business_id: &str,
        update: &BusinessPaymentUpdate,
    ) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("simulated store outage".into()));
        }

        self.records
            .lock()
            .expect("store lock poisoned")
            .insert(business_id.to_string(), update.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
