pub mod dashboard;
pub mod health;

use crate::config::Config;
use crate::datasource::SnapshotSource;
use crate::domain::RawSnapshot;
use crate::error::AppError;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn SnapshotSource>,
    pub config: Config,
}

impl AppState {
    pub fn new(source: Arc<dyn SnapshotSource>, config: Config) -> Self {
        Self { source, config }
    }

    /// Fetch and validate one snapshot. Every request derives from a fresh one.
    pub async fn load_snapshot(&self) -> Result<RawSnapshot, AppError> {
        let payload = self.source.fetch_snapshot().await?;
        let snapshot = RawSnapshot::from_json(payload).map_err(|e| {
            tracing::warn!(error = %e, "Rejecting malformed snapshot");
            e
        })?;
        Ok(snapshot)
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/dashboard", get(dashboard::get_dashboard))
        .route("/v1/positions", get(dashboard::get_positions))
        .route("/v1/summary", get(dashboard::get_summary))
        .route("/v1/history", get(dashboard::get_history))
        .layer(cors)
        .with_state(state)
}
