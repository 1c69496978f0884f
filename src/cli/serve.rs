use crate::cli::commands::ServeArgs;
use crate::errors::CityScanError;
use crate::api;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), CityScanError> {
    let settings = super::load_settings(args.common.config.as_deref(), &args.overrides()).await?;
    info!(
        host = %settings.host,
        port = settings.port,
        model = %settings.model,
        "Starting API server"
    );

    let state = api::create_app_state(&settings).await?;
    let app = api::build_router(state);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| CityScanError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
