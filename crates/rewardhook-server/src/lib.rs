pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;

use crate::api::routes;
use crate::config::Config;
use crate::store::{BusinessStore, FirestoreStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn BusinessStore>,
}

pub struct App {
    state: Arc<AppState>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let store = Arc::new(FirestoreStore::new(
            http_client,
            &config.firestore_project_id,
            &config.firestore_database_id,
            config.firestore_access_token.clone(),
        ));

        Ok(Self::with_store(config, store))
    }

    /// Builds the app around an arbitrary store implementation so tests can
    /// substitute an in-memory one.
    pub fn with_store(config: Config, store: Arc<dyn BusinessStore>) -> Self {
        let state = Arc::new(AppState { config, store });
        Self { state }
    }

    pub fn router(&self) -> Router {
        routes::build(self.state.clone())
    }
}
