//! services/reader_host/src/bin/reader_host.rs

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use reader_host_lib::{
    adapters::{HttpCheckpointAdapter, LocalDocumentStore},
    config::Config,
    error::ReaderHostError,
    web::{self, rest::ApiDoc, state::AppState},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ReaderHostError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    info!(backend = %config.backend_url, "Using backend.");
    let checkpoints = Arc::new(HttpCheckpointAdapter::new(config.backend_url.clone())?);
    info!(library = %config.library_path.display(), "Using document library.");
    let documents = Arc::new(LocalDocumentStore::new(config.library_path.clone()));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), checkpoints, documents));

    let origin = config.allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ReaderHostError::Internal(format!(
            "ALLOWED_ORIGIN '{}' is not a valid header value: {}",
            config.allowed_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // --- 4. Create the Web Router ---
    let app = Router::new()
        .merge(web::router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
