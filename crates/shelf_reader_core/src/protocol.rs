//! crates/shelf_reader_core/src/protocol.rs
//!
//! Defines the message protocol between the reading session and the EPUB
//! renderer. Both directions are JSON objects tagged by a `type` field.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Revision of the renderer message set below. Bumped whenever a kind is added or changed.
pub const RENDERER_PROTOCOL_VERSION: u32 = 1;

//=========================================================================================
// Messages Sent FROM the Renderer TO the Session
//=========================================================================================

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RendererEvent {
    /// The renderer finished building its location index. Position reports are
    /// only meaningful after this.
    Ready,

    /// Sent on every relocation. `percent` is in `[0, 100]`.
    Progress {
        current: Option<f64>,
        total: Option<f64>,
        percent: Option<f64>,
        cfi: Option<String>,
    },
}

impl RendererEvent {
    /// Parses a raw renderer message. Malformed or unknown messages are dropped.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("Dropped malformed renderer message: {}", e);
                None
            }
        }
    }
}

//=========================================================================================
// Messages Sent FROM the Session TO the Renderer
//=========================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RendererCommand {
    /// Jump to a ratio in `[0, 1]`; the renderer maps it to a location itself.
    Seek { percent: f64 },

    /// Jump to a saved canonical fragment identifier.
    LoadLocation { cfi: String },
}

impl RendererCommand {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
