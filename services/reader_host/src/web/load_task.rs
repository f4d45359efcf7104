//! services/reader_host/src/web/load_task.rs
//!
//! This module contains the asynchronous "worker" that loads a document and its
//! checkpoint, then moves the session out of `Loading`.

use crate::error::ReaderHostError;
use crate::web::{
    protocol::HostMessage,
    state::AppState,
    ws_handler::{effect_message, opened_message, position_message, write_binary, write_message, SharedSender},
};
use shelf_reader_core::domain::FileId;
use shelf_reader_core::session::{SessionContent, SessionPhase, SessionState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Loads the document for an open session.
///
/// The load is abandoned when `cancellation_token` fires, and its result is
/// discarded if the session was closed while it was in flight.
pub async fn load_process(
    app_state: Arc<AppState>,
    session_state_lock: Arc<Mutex<SessionState>>,
    ws_sender: SharedSender,
    cancellation_token: CancellationToken,
    file_id: FileId,
    name: String,
) -> Result<(), ReaderHostError> {
    info!(file_id, "Load process started.");

    let loaded = tokio::select! {
        _ = cancellation_token.cancelled() => {
            info!(file_id, "Load process cancelled.");
            return Ok(());
        }
        loaded = app_state.loader.load(file_id, &name) => loaded,
    };

    let mut outgoing = Vec::new();
    let mut epub_bytes = None;
    // The sink is taken before the session is released, so nothing the main
    // loop produces for the now active session can overtake `opened`.
    let mut sink = {
        let mut session = session_state_lock.lock().await;
        if session.phase() != SessionPhase::Loading {
            info!(file_id, "Session closed during load; result discarded.");
            return Ok(());
        }

        outgoing.push(opened_message(&session, &name, &loaded.content));
        if let SessionContent::Epub(bytes) = &loaded.content {
            epub_bytes = Some(bytes.clone());
        }
        if let Some(e) = &loaded.document_error {
            outgoing.push(HostMessage::Error {
                message: format!("The document could not be read: {}", e),
            });
        }

        let effect = session.finish_loading(loaded.content, loaded.checkpoint);
        outgoing.extend(effect.and_then(effect_message));
        outgoing.push(position_message(&session));
        ws_sender.lock().await
    };

    let mut messages = outgoing.into_iter();
    if let Some(opened) = messages.next() {
        write_message(&mut sink, &opened).await?;
    }
    if let Some(bytes) = epub_bytes {
        write_binary(&mut sink, bytes).await?;
    }
    for message in messages {
        write_message(&mut sink, &message).await?;
    }

    info!(file_id, "Document loaded.");
    Ok(())
}
