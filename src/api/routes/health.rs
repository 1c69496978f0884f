use axum::Json;
use crate::api::models::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "cityscan",
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("GIT_HASH"),
        built_at: option_env!("BUILD_TIMESTAMP"),
    })
}
