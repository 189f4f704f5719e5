mod firestore;
mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::BusinessPaymentUpdate;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("business {0} not found")]
    NotFound(String),

    #[error("document store request failed: {0}")]
    Transport(String),

    #[error("document store rejected update (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Seam between the webhook handler and the document database holding
/// business records.
#[async_trait]
pub trait BusinessStore: Send + Sync {
    /// Applies the payment fields to the business document identified by
    /// `business_id` as a single atomic update. Must not create the
    /// document; business records are owned and created elsewhere.
    async fn apply_payment(
        &self,
        business_id: &str,
        update: &BusinessPaymentUpdate,
    ) -> Result<(), StoreError>;
}
