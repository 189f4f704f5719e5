use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{BusinessStore, StoreError};
use crate::domain::BusinessPaymentUpdate;

const COLLECTION: &str = "Business";

/// Firestore REST client scoped to the business collection.
///
/// A single `documents.patch` with an update mask writes the payment
/// fields in one atomic call. The `currentDocument.exists` precondition
/// makes Firestore reject the write for an unknown id instead of
/// creating a document.
pub struct FirestoreStore {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl FirestoreStore {
    pub fn new(
        http: reqwest::Client,
        project_id: &str,
        database_id: &str,
        access_token: String,
    ) -> Self {
        let base_url = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/{}/documents",
            project_id, database_id
        );
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Points the client at an arbitrary documents root, for the Firestore
    /// emulator.
    pub fn with_base_url(http: reqwest::Client, base_url: String, access_token: String) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }
}

#[async_trait]
impl BusinessStore for FirestoreStore {
    async fn apply_payment(
        &self,
        business_id: &str,
        update: &BusinessPaymentUpdate,
    ) -> Result<(), StoreError> {
        let url = format!("{}/{}/{}", self.base_url, COLLECTION, business_id);

        let body = json!({
            "fields": {
                "last_payment_date": { "stringValue": update.last_payment_date },
                "payment_status": { "stringValue": update.payment_status },
                "last_month_points_redeemed": {
                    "integerValue": update.last_month_points_redeemed.to_string()
                }
            }
        });

        let res = self
            .http
            .patch(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("updateMask.fieldPaths", "last_payment_date"),
                ("updateMask.fieldPaths", "payment_status"),
                ("updateMask.fieldPaths", "last_month_points_redeemed"),
                ("currentDocument.exists", "true"),
            ])
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            debug!(business_id, "business document patched");
            return Ok(());
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(business_id.to_string()));
        }

        let message = res.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
