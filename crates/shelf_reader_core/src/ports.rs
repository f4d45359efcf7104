//! crates/shelf_reader_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the reader's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the progress backend and of on-device storage.

use async_trait::async_trait;
use bytes::Bytes;
use crate::domain::{FileId, ReadingCheckpoint};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, filesystem).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The remote store of reading checkpoints, keyed by file identifier.
#[async_trait]
pub trait CheckpointService: Send + Sync {
    /// Fetches the last saved checkpoint for a file.
    async fn fetch_checkpoint(&self, file_id: FileId) -> PortResult<ReadingCheckpoint>;

    /// Persists a checkpoint. The structural location is only sent when present.
    async fn save_checkpoint(&self, file_id: FileId, checkpoint: &ReadingCheckpoint) -> PortResult<()>;
}

/// Read access to documents already copied into app storage.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the raw bytes of an imported file by its stored name.
    async fn read_document(&self, name: &str) -> PortResult<Bytes>;
}
