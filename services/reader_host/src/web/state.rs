//! services/reader_host/src/web/state.rs
//!
//! Defines the host's shared state.

use crate::config::Config;
use shelf_reader_core::encoding::EncodingResolver;
use shelf_reader_core::loader::SessionLoader;
use shelf_reader_core::ports::{CheckpointService, DocumentStore};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub checkpoints: Arc<dyn CheckpointService>,
    pub documents: Arc<dyn DocumentStore>,
    pub resolver: EncodingResolver,
    pub loader: SessionLoader,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        checkpoints: Arc<dyn CheckpointService>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        let resolver = EncodingResolver::default();
        let loader = SessionLoader::new(checkpoints.clone(), documents.clone(), resolver.clone());
        Self {
            config,
            checkpoints,
            documents,
            resolver,
            loader,
        }
    }
}
