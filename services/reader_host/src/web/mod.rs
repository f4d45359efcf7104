pub mod load_task;
pub mod protocol;
pub mod rest;
pub mod state;
pub mod ws_handler;

// Re-export the handlers to make them easily accessible
// to the binary that will build the web server router.
pub use rest::preview_handler;
pub use ws_handler::ws_handler;

use axum::{routing::get, Router};
use state::AppState;
use std::sync::Arc;

/// Builds the API router with every reader route attached.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/library/{name}/preview", get(preview_handler))
        .with_state(app_state)
}
