pub mod domain;
pub mod encoding;
pub mod loader;
pub mod ports;
pub mod preview;
pub mod protocol;
pub mod session;

pub use domain::{DecodedText, Document, DocumentKind, FileId, PageInfo, ReadingCheckpoint};
pub use encoding::{resolve, EncodingResolver};
pub use loader::{persist_checkpoint, LoadedSession, SessionLoader};
pub use ports::{CheckpointService, DocumentStore, PortError, PortResult};
pub use protocol::{RendererCommand, RendererEvent};
pub use session::{ResumeChoice, ScrollGeometry, SessionContent, SessionEffect, SessionPhase, SessionState};
