//! license-classifier library
//!
//! Ingests software license names from a tabular file, classifies each into a
//! business-category typology via an LLM backend, persists results in SQLite,
//! and exposes a small HTTP API with human-override support. Exposed as a
//! library so integration tests can drive the router directly.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use crate::config::Config;
use crate::services::classifier::Classifier;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Classification backend, selected once at startup
    pub classifier: Arc<Classifier>,
    /// Process configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: SqlitePool, classifier: Classifier, config: Config) -> Self {
        Self {
            db,
            classifier: Arc::new(classifier),
            config: Arc::new(config),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, patch, post};

    Router::new()
        .route("/classify", post(api::classify_all))
        .route("/licenses", get(api::list_licenses))
        .route("/licenses/:license_id", patch(api::update_license))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
