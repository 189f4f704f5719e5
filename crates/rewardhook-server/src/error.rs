use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::signature::SignatureError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Webhook not configured")]
    NotConfigured,

    #[error("{0}")]
    Signature(#[from] SignatureError),

    #[error("malformed event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("business update failed: {0}")]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Signature(_) | Self::MalformedEvent(_) => StatusCode::BAD_REQUEST,
            // A failed document write must come back retryable so the
            // provider redelivers the event.
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
