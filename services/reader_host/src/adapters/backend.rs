//! services/reader_host/src/adapters/backend.rs
//!
//! This module contains the adapter for the remote file backend's progress
//! endpoints. It implements the `CheckpointService` port from the core crate.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shelf_reader_core::domain::{FileId, ReadingCheckpoint};
use shelf_reader_core::ports::{CheckpointService, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `CheckpointService` port over the backend REST API.
#[derive(Clone)]
pub struct HttpCheckpointAdapter {
    client: Client,
    base_url: String,
}

impl HttpCheckpointAdapter {
    /// Creates a new `HttpCheckpointAdapter` rooted at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

//=========================================================================================
// Wire Records
//=========================================================================================

/// The subset of `GET /files/{id}` the reader cares about.
#[derive(Deserialize)]
struct FileInfoRecord {
    #[serde(default)]
    progress: Option<f64>,
    #[serde(rename = "epubCfi", default)]
    epub_cfi: Option<String>,
}

impl FileInfoRecord {
    fn to_domain(self) -> ReadingCheckpoint {
        ReadingCheckpoint::new(
            self.progress.unwrap_or(0.0),
            self.epub_cfi.filter(|cfi| !cfi.is_empty()),
        )
    }
}

/// Body of `PATCH /files/{id}/progress`.
#[derive(Serialize)]
struct ProgressRecord<'a> {
    progress: f64,
    #[serde(rename = "epubCfi", skip_serializing_if = "Option::is_none")]
    epub_cfi: Option<&'a str>,
}

fn transport_error(e: reqwest::Error) -> PortError {
    if e.is_connect() || e.is_timeout() {
        PortError::Unavailable(e.to_string())
    } else {
        PortError::Unexpected(e.to_string())
    }
}

//=========================================================================================
// `CheckpointService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CheckpointService for HttpCheckpointAdapter {
    async fn fetch_checkpoint(&self, file_id: FileId) -> PortResult<ReadingCheckpoint> {
        let url = format!("{}/files/{}", self.base_url, file_id);
        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(PortError::NotFound(format!("file {}", file_id))),
            status if !status.is_success() => Err(PortError::Unexpected(format!(
                "GET {} returned {}",
                url, status
            ))),
            _ => {
                let record: FileInfoRecord = response.json().await.map_err(transport_error)?;
                Ok(record.to_domain())
            }
        }
    }

    async fn save_checkpoint(&self, file_id: FileId, checkpoint: &ReadingCheckpoint) -> PortResult<()> {
        let url = format!("{}/files/{}/progress", self.base_url, file_id);
        let body = ProgressRecord {
            progress: checkpoint.progress,
            epub_cfi: checkpoint.structural_location.as_deref(),
        };
        let response = self
            .client
            .patch(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(PortError::NotFound(format!("file {}", file_id))),
            status if !status.is_success() => Err(PortError::Unexpected(format!(
                "PATCH {} returned {}",
                url, status
            ))),
            _ => Ok(()),
        }
    }
}
