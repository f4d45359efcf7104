//! crates/shelf_reader_core/src/domain.rs
//!
//! Defines the pure, core data structures for the reader.
//! These structs are independent of any transport or wire format.

use bytes::Bytes;

/// Server-assigned identifier of an imported file.
pub type FileId = i64;

/// The two content types the reader knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Epub,
}

impl DocumentKind {
    /// Picks the document kind from the imported file name.
    pub fn from_file_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".epub") {
            DocumentKind::Epub
        } else {
            DocumentKind::PlainText
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::PlainText => "plain_text",
            DocumentKind::Epub => "epub",
        }
    }
}

/// The title shown in the reader: the file name without its last extension.
pub fn document_title(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// An imported document as read from app storage. Never mutated during a session.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: FileId,
    pub kind: DocumentKind,
    pub name: String,
    pub bytes: Bytes,
}

/// Text produced by the encoding resolver, with the label of the encoding used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static str,
}

/// The persisted reading position of one document.
///
/// `structural_location` is only ever set for EPUB documents and, when present,
/// takes precedence over `progress` because it survives repagination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadingCheckpoint {
    pub progress: f64,
    pub structural_location: Option<String>,
}

impl ReadingCheckpoint {
    pub fn new(progress: f64, structural_location: Option<String>) -> Self {
        Self {
            progress: clamp_ratio(progress),
            structural_location,
        }
    }

    /// A checkpoint with any progress past the origin warrants asking the reader where to start.
    pub fn is_resumable(&self) -> bool {
        self.progress > 0.0
    }
}

/// Cosmetic page numbers shown under the reader. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current: u32,
    pub total: u32,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self { current: 1, total: 1 }
    }
}

/// Clamps a ratio into `[0, 1]`; NaN collapses to the origin.
pub fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}
