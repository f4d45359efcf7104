//! services/reader_host/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::ReaderHostError;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use shelf_reader_core::domain::{document_title, DocumentKind};
use shelf_reader_core::preview::import_preview;
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        preview_handler,
    ),
    components(
        schemas(PreviewResponse)
    ),
    tags(
        (name = "Shelf Reader Host", description = "Endpoints for the e-reader library and reading sessions.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// The preview of a file in the library, as stored at import time.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct PreviewResponse {
    pub title: String,
    /// Either `plain_text` or `epub`.
    pub kind: String,
    pub preview: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Build the import preview of a stored file.
///
/// Plain text yields its first 100 characters; EPUB yields the first 200
/// characters of its first manifest chapter. Unreadable content yields a
/// placeholder rather than an error.
#[utoipa::path(
    get,
    path = "/library/{name}/preview",
    responses(
        (status = 200, description = "Preview built", body = PreviewResponse),
        (status = 404, description = "No such file in the library"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("name" = String, Path, description = "The stored file name, including its extension.")
    )
)]
pub async fn preview_handler(
    State(app_state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<PreviewResponse>, ReaderHostError> {
    let bytes = app_state.documents.read_document(&name).await?;
    let kind = DocumentKind::from_file_name(&name);
    let preview = import_preview(kind, &bytes, &app_state.resolver);
    info!(name = %name, kind = kind.as_str(), "Preview built.");

    Ok(Json(PreviewResponse {
        title: document_title(&name).to_string(),
        kind: kind.as_str().to_string(),
        preview,
    }))
}
