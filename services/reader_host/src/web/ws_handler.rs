//! services/reader_host/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for a reader connection.
//! One connection is one reading session: it opens with `open`, feeds shell and
//! renderer events into the session state machine, and persists the final
//! checkpoint when the socket goes away.

use crate::error::ReaderHostError;
use crate::web::{
    load_task::load_process,
    protocol::{HostMessage, ShellMessage},
    state::AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use bytes::Bytes;
use futures::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use shelf_reader_core::domain::{document_title, DocumentKind};
use shelf_reader_core::loader::persist_checkpoint;
use shelf_reader_core::protocol::RENDERER_PROTOCOL_VERSION;
use shelf_reader_core::session::{
    ScrollGeometry, SessionContent, SessionEffect, SessionPhase, SessionState,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// The write half of a connection.
pub type WsSink = SplitSink<WebSocket, Message>;

/// The write half, shared between the control loop and the load task.
pub type SharedSender = Arc<Mutex<WsSink>>;

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New reader connection established.");

    let (sender, mut receiver) = socket.split();
    let ws_sender: SharedSender = Arc::new(Mutex::new(sender));

    // --- 1. Open Phase ---
    // Control and binary frames are skipped; the first text frame must be `open`.
    let (file_id, name) = loop {
        match receiver.next().await {
            Some(Ok(Message::Text(open_json))) => {
                match serde_json::from_str::<ShellMessage>(&open_json) {
                    Ok(ShellMessage::Open { file_id, name }) => break (file_id, name),
                    _ => {
                        error!("First message was not a valid open message.");
                        let err_msg = HostMessage::Error {
                            message: "The first message must open a document.".to_string(),
                        };
                        let _ = send_message(&ws_sender, &err_msg).await;
                        return;
                    }
                }
            }
            Some(Ok(Message::Close(_))) | None => {
                info!("Shell disconnected before opening a document.");
                return;
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
                warn!("Reader connection error before open: {}", e);
                return;
            }
        }
    };

    let session = SessionState::new(file_id, DocumentKind::from_file_name(&name));
    let session_id = session.session_id();
    info!(%session_id, file_id, name = %name, "Opening document.");
    let session_state_lock = Arc::new(Mutex::new(session));

    let load_token = CancellationToken::new();
    let load_task = {
        let app_state = app_state.clone();
        let session_state_lock = session_state_lock.clone();
        let ws_sender = ws_sender.clone();
        let token = load_token.clone();
        tokio::spawn(async move {
            if let Err(e) =
                load_process(app_state, session_state_lock, ws_sender, token, file_id, name).await
            {
                error!("Load process failed: {:?}", e);
            }
        })
    };

    // --- 2. Main Message Loop ---
    loop {
        match receiver.next().await {
            Some(Ok(Message::Text(text))) => {
                let Ok(message) = serde_json::from_str::<ShellMessage>(&text) else {
                    warn!("Failed to deserialize shell message.");
                    continue;
                };
                let outgoing = {
                    let mut session = session_state_lock.lock().await;
                    apply_shell_message(&mut session, message)
                };
                for message in outgoing {
                    if let Err(e) = send_message(&ws_sender, &message).await {
                        warn!("Failed to send message to shell: {}", e);
                    }
                }
            }
            Some(Ok(Message::Close(_))) => {
                info!("Shell sent close message.");
                break;
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                warn!("Reader connection error: {}", e);
                break;
            }
            None => {
                info!("Shell disconnected.");
                break;
            }
        }
    }

    // --- 3. Teardown ---
    load_token.cancel();
    let checkpoint = session_state_lock.lock().await.close();
    load_task.abort();
    if let Some(checkpoint) = checkpoint {
        tokio::spawn(persist_checkpoint(app_state.checkpoints.clone(), file_id, checkpoint));
    }
    info!(%session_id, "Reader connection closed.");
}

/// Feeds one shell message into the session and returns what to tell the shell.
pub(crate) fn apply_shell_message(session: &mut SessionState, message: ShellMessage) -> Vec<HostMessage> {
    let effect = match message {
        ShellMessage::Open { .. } => {
            warn!("Received subsequent open message, which is ignored.");
            return Vec::new();
        }
        ShellMessage::ToggleChrome => {
            return vec![HostMessage::Chrome {
                visible: session.toggle_chrome(),
            }];
        }
        ShellMessage::Layout {
            content_height,
            viewport_height,
        } => session.on_layout(ScrollGeometry {
            content_height,
            viewport_height,
        }),
        ShellMessage::Scroll { offset } => {
            if !session.on_scroll(offset) {
                return Vec::new();
            }
            None
        }
        ShellMessage::Seek { ratio } => session.seek(ratio),
        ShellMessage::Resume { choice } => session.resolve_resume(choice),
        ShellMessage::Renderer { message } => session.on_renderer_message(&message),
    };

    let mut outgoing: Vec<HostMessage> = effect.and_then(effect_message).into_iter().collect();
    if session.phase() == SessionPhase::Active {
        outgoing.push(position_message(session));
    }
    outgoing
}

pub(crate) fn effect_message(effect: SessionEffect) -> Option<HostMessage> {
    match effect {
        SessionEffect::PromptResume { progress, excerpt } => {
            Some(HostMessage::ResumePrompt { progress, excerpt })
        }
        SessionEffect::ScrollTo { offset } => Some(HostMessage::ScrollTo { offset }),
        SessionEffect::Renderer(command) => match command.to_json() {
            Ok(message) => Some(HostMessage::Renderer { message }),
            Err(e) => {
                error!("Failed to serialize renderer command: {}", e);
                None
            }
        },
    }
}

pub(crate) fn position_message(session: &SessionState) -> HostMessage {
    let pages = session.page_info();
    HostMessage::Position {
        progress: session.progress(),
        current_page: pages.current,
        total_pages: pages.total,
    }
}

pub(crate) fn opened_message(session: &SessionState, name: &str, content: &SessionContent) -> HostMessage {
    let (text, encoding) = match content {
        SessionContent::PlainText(decoded) => (Some(decoded.text.clone()), Some(decoded.encoding)),
        SessionContent::Epub(_) => (None, None),
    };
    HostMessage::Opened {
        session_id: session.session_id(),
        kind: session.kind().as_str(),
        title: document_title(name).to_string(),
        text,
        encoding,
        renderer_protocol: RENDERER_PROTOCOL_VERSION,
    }
}

pub(crate) async fn send_message(ws_sender: &SharedSender, message: &HostMessage) -> Result<(), ReaderHostError> {
    let mut sink = ws_sender.lock().await;
    write_message(&mut sink, message).await
}

/// Writes one message on a sink the caller already holds.
pub(crate) async fn write_message(sink: &mut WsSink, message: &HostMessage) -> Result<(), ReaderHostError> {
    let json = serde_json::to_string(message)?;
    sink.send(Message::Text(json.into())).await?;
    Ok(())
}

pub(crate) async fn write_binary(sink: &mut WsSink, bytes: Bytes) -> Result<(), ReaderHostError> {
    sink.send(Message::Binary(bytes)).await?;
    Ok(())
}
