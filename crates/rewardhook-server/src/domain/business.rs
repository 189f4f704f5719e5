use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// The three fields written to a business document when a payment
/// succeeds. The write is a pure overwrite, so redelivering the same
/// event leaves the record in the same state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessPaymentUpdate {
    pub last_payment_date: String,
    pub payment_status: String,
    pub last_month_points_redeemed: i64,
}

impl BusinessPaymentUpdate {
    pub fn paid() -> Self {
        Self {
            last_payment_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            payment_status: "paid".into(),
            last_month_points_redeemed: 0,
        }
    }
}
