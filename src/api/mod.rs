pub mod routes;
pub mod models;
pub mod errors;
pub mod upload;

use std::path::PathBuf;
use std::sync::Arc;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;
use crate::config::Settings;
use crate::errors::CityScanError;
use crate::pipeline::Orchestrator;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

pub async fn create_app_state(settings: &Settings) -> Result<AppState, CityScanError> {
    tokio::fs::create_dir_all(&settings.upload_dir).await?;
    info!(dir = %settings.upload_dir.display(), "Upload directory ready");

    Ok(AppState {
        orchestrator: Arc::new(Orchestrator::from_settings(settings)?),
        upload_dir: settings.upload_dir.clone(),
        max_upload_bytes: settings.max_upload_bytes,
    })
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        .route("/health", axum::routing::get(routes::health::health_check))
        .route("/analyze", axum::routing::post(routes::analyze::analyze_image))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
