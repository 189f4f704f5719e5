use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::signature::{self, SignatureError, SIGNATURE_HEADER};
use crate::domain::{BusinessPaymentUpdate, StripeEvent, PAYMENT_INTENT_SUCCEEDED};
use crate::error::{AppError, Result};
use crate::AppState;

/// `POST /payment-webhook`
///
/// Consumes the raw body bytes so the signature is checked over exactly
/// what the provider signed; the JSON is parsed only after verification.
pub async fn receive(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    let signature_header = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    info!(
        has_signature = signature_header.is_some(),
        body_len = body.len(),
        "webhook delivery received"
    );

    // Fail closed: without the shared secret nothing can be verified.
    let secret = state
        .config
        .webhook_secret
        .as_deref()
        .ok_or(AppError::NotConfigured)?;

    let signature_header = signature_header.ok_or(SignatureError::MissingHeader)?;

    signature::verify(
        &body,
        signature_header,
        secret,
        state.config.webhook_tolerance_seconds,
        Utc::now().timestamp(),
    )?;

    let event: StripeEvent = serde_json::from_slice(&body)?;
    info!(event_type = %event.event_type, event_id = ?event.id, "webhook event verified");

    if event.event_type == PAYMENT_INTENT_SUCCEEDED {
        let intent = event.payment_intent()?;
        match intent.business_id() {
            Some(business_id) => {
                info!(business_id, amount = intent.amount, "payment succeeded");

                let update = BusinessPaymentUpdate::paid();
                state.store.apply_payment(business_id, &update).await?;

                info!(business_id, "business payment status updated");
            }
            None => {
                warn!("payment_intent.succeeded without businessId metadata, skipping update");
            }
        }
    }

    // Every verified event is acknowledged, written or not.
    Ok(Json(json!({ "received": true })))
}
