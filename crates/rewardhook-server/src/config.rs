use anyhow::{Context, Result};
use std::env;

#[derive(Clone)]
pub struct Config {
    pub bind_address: String,
    pub webhook_secret: Option<String>,
    pub webhook_tolerance_seconds: i64,
    pub firestore_project_id: String,
    pub firestore_database_id: String,
    pub firestore_access_token: String,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            // A missing secret is surfaced as 503 on every delivery, not as
            // a startup failure.
            webhook_secret: env::var("STRIPE_WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            webhook_tolerance_seconds: env::var("WEBHOOK_TOLERANCE_SECONDS")
                .unwrap_or_else(|_| "300".into())
                .parse()?,
            firestore_project_id: env::var("FIRESTORE_PROJECT_ID")
                .context("FIRESTORE_PROJECT_ID required")?,
            firestore_database_id: env::var("FIRESTORE_DATABASE_ID")
                .unwrap_or_else(|_| "(default)".into()),
            firestore_access_token: env::var("FIRESTORE_ACCESS_TOKEN")
                .context("FIRESTORE_ACCESS_TOKEN required")?,
            otlp_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
        })
    }
}
