use serde::Deserialize;
use serde_json::Value;

/// The only event type that triggers a business update.
pub const PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";

/// Provider event envelope. `data.object` stays untyped until the event
/// type is known; provider payloads carry many fields we never look at.
#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub object: Value,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub metadata: PaymentIntentMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentIntentMetadata {
    #[serde(rename = "businessId")]
    pub business_id: Option<String>,
}

impl StripeEvent {
    pub fn payment_intent(&self) -> Result<PaymentIntent, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

impl PaymentIntent {
    /// The business this payment belongs to. An empty string in the
    /// metadata counts as absent.
    pub fn business_id(&self) -> Option<&str> {
        self.metadata
            .business_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}
