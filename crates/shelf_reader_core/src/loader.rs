//! crates/shelf_reader_core/src/loader.rs
//!
//! Gathers everything a session needs to leave `Loading`, and writes the final
//! checkpoint back when it ends. Both directions degrade instead of failing:
//! the reader must open even when storage or the backend misbehave.

use crate::domain::{Document, DocumentKind, FileId, ReadingCheckpoint};
use crate::encoding::EncodingResolver;
use crate::ports::{CheckpointService, DocumentStore, PortError};
use crate::session::SessionContent;
use std::sync::Arc;
use tracing::{error, info, warn};

/// The outcome of a load. Failures are reported alongside safe defaults.
#[derive(Debug)]
pub struct LoadedSession {
    pub content: SessionContent,
    /// `None` when the file has no saved position or the fetch failed.
    pub checkpoint: Option<ReadingCheckpoint>,
    pub document_error: Option<PortError>,
}

#[derive(Clone)]
pub struct SessionLoader {
    checkpoints: Arc<dyn CheckpointService>,
    documents: Arc<dyn DocumentStore>,
    resolver: EncodingResolver,
}

impl SessionLoader {
    pub fn new(
        checkpoints: Arc<dyn CheckpointService>,
        documents: Arc<dyn DocumentStore>,
        resolver: EncodingResolver,
    ) -> Self {
        Self {
            checkpoints,
            documents,
            resolver,
        }
    }

    /// Reads the document and fetches its checkpoint concurrently.
    pub async fn load(&self, file_id: FileId, name: &str) -> LoadedSession {
        let kind = DocumentKind::from_file_name(name);
        let (bytes, checkpoint) = futures::join!(
            self.documents.read_document(name),
            self.checkpoints.fetch_checkpoint(file_id)
        );

        let checkpoint = match checkpoint {
            Ok(checkpoint) => Some(checkpoint),
            Err(e) => {
                warn!(file_id, "Failed to fetch checkpoint, starting at the beginning: {}", e);
                None
            }
        };

        match bytes {
            Ok(bytes) => {
                let document = Document {
                    id: file_id,
                    kind,
                    name: name.to_string(),
                    bytes,
                };
                LoadedSession {
                    content: SessionContent::from_document(&document, &self.resolver),
                    checkpoint,
                    document_error: None,
                }
            }
            Err(e) => {
                warn!(file_id, name, "Failed to read document: {}", e);
                LoadedSession {
                    content: SessionContent::empty(kind),
                    checkpoint,
                    document_error: Some(e),
                }
            }
        }
    }
}

/// Best-effort checkpoint write. Failures are logged and never retried.
pub async fn persist_checkpoint(
    checkpoints: Arc<dyn CheckpointService>,
    file_id: FileId,
    checkpoint: ReadingCheckpoint,
) {
    match checkpoints.save_checkpoint(file_id, &checkpoint).await {
        Ok(()) => info!(file_id, progress = checkpoint.progress, "Checkpoint saved."),
        Err(e) => error!(file_id, "Failed to save checkpoint: {}", e),
    }
}
