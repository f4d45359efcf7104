//! services/reader_host/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the reader shell (the
//! presentation layer) and the host that owns the reading session.

use serde::{Deserialize, Serialize};
use shelf_reader_core::domain::FileId;
use shelf_reader_core::session::ResumeChoice;
use uuid::Uuid;

//=========================================================================================
// Messages Sent FROM the Shell TO the Host
//=========================================================================================

/// Represents the structured text messages the shell can send to the host.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellMessage {
    /// Opens a document. This must be the first message sent on the connection.
    Open { file_id: FileId, name: String },

    /// Reports the plain-text view geometry after layout or content size changes.
    Layout { content_height: f64, viewport_height: f64 },

    /// Reports the plain-text scroll offset.
    Scroll { offset: f64 },

    /// Slider released at a ratio of the document.
    Seek { ratio: f64 },

    /// Answer to a `resume_prompt`.
    Resume { choice: ResumeChoice },

    /// The reading area was tapped.
    ToggleChrome,

    /// A raw message posted by the EPUB renderer, forwarded verbatim.
    Renderer { message: String },
}

//=========================================================================================
// Messages Sent FROM the Host TO the Shell
//=========================================================================================
// NOTE: EPUB content is sent as one raw Binary frame right after `Opened`.
//=========================================================================================

/// Represents the structured text messages the host can send to the shell.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// The document is loaded. Plain text carries its decoded text inline.
    Opened {
        session_id: Uuid,
        kind: &'static str,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        encoding: Option<&'static str>,
        renderer_protocol: u32,
    },

    /// A saved position exists; the shell must answer with `resume`.
    ResumePrompt {
        progress: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        excerpt: Option<String>,
    },

    /// Scroll the plain-text view to an absolute offset.
    ScrollTo { offset: f64 },

    /// A serialized command to post to the EPUB renderer.
    Renderer { message: String },

    /// The current reading position for the progress bar.
    Position {
        progress: f64,
        current_page: u32,
        total_pages: u32,
    },

    /// Whether the reader chrome should be visible.
    Chrome { visible: bool },

    /// Reports a non-fatal problem the shell may surface.
    Error { message: String },
}
