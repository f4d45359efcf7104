//! crates/shelf_reader_core/src/session.rs
//!
//! The reading-session state machine.
//!
//! A session moves `Loading -> {AwaitingResume | Active} -> Active -> Closed`.
//! Every handler is a synchronous `&mut self` transition, so whatever calls
//! `close` always observes the last applied position. Handlers return the side
//! effect the presentation layer must carry out, if any.

use crate::domain::{
    clamp_ratio, DecodedText, Document, DocumentKind, FileId, PageInfo, ReadingCheckpoint,
};
use crate::encoding::EncodingResolver;
use crate::preview::resume_excerpt;
use crate::protocol::{RendererCommand, RendererEvent};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// An enum representing where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    AwaitingResume,
    Active,
    Closed,
}

/// The reader's answer to the resume prompt.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResumeChoice {
    Restart,
    Continue,
}

/// The document content a session displays.
#[derive(Debug, Clone)]
pub enum SessionContent {
    /// Decoded once at load and kept for the session lifetime.
    PlainText(DecodedText),
    /// Handed to the renderer untouched.
    Epub(Bytes),
}

impl SessionContent {
    pub fn from_document(document: &Document, resolver: &EncodingResolver) -> Self {
        match document.kind {
            DocumentKind::PlainText => {
                SessionContent::PlainText(resolver.resolve_document(&document.bytes))
            }
            DocumentKind::Epub => SessionContent::Epub(document.bytes.clone()),
        }
    }

    /// Placeholder content used when the document itself could not be read.
    pub fn empty(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::PlainText => SessionContent::PlainText(DecodedText {
                text: String::new(),
                encoding: "utf-8",
            }),
            DocumentKind::Epub => SessionContent::Epub(Bytes::new()),
        }
    }
}

/// Scroll geometry of the plain-text view, in layout units.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    pub content_height: f64,
    pub viewport_height: f64,
}

impl ScrollGeometry {
    fn max_scroll(&self) -> f64 {
        self.content_height - self.viewport_height
    }
}

/// Something the presentation layer has to do in response to a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Ask the reader whether to continue from `progress` or restart.
    PromptResume {
        progress: f64,
        excerpt: Option<String>,
    },
    /// Scroll the plain-text view to an absolute offset.
    ScrollTo { offset: f64 },
    /// Forward a command to the EPUB renderer.
    Renderer(RendererCommand),
}

/// The state for a single open document.
pub struct SessionState {
    session_id: Uuid,
    file_id: FileId,
    kind: DocumentKind,
    opened_at: DateTime<Utc>,
    phase: SessionPhase,
    content: Option<SessionContent>,
    progress: f64,
    /// Last CFI reported by the renderer during this session.
    structural_location: Option<String>,
    show_ui: bool,
    pending_resume: Option<ReadingCheckpoint>,
    /// Plain text: ratio to scroll to once the layout is known.
    pending_restore: Option<f64>,
    /// EPUB: restore command to send once the renderer is ready.
    pending_location: Option<RendererCommand>,
    locations_ready: bool,
    geometry: Option<ScrollGeometry>,
    renderer_page: PageInfo,
}

impl SessionState {
    pub fn new(file_id: FileId, kind: DocumentKind) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            file_id,
            kind,
            opened_at: Utc::now(),
            phase: SessionPhase::Loading,
            content: None,
            progress: 0.0,
            structural_location: None,
            show_ui: true,
            pending_resume: None,
            pending_restore: None,
            pending_location: None,
            locations_ready: false,
            geometry: None,
            renderer_page: PageInfo::default(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn structural_location(&self) -> Option<&str> {
        self.structural_location.as_deref()
    }

    pub fn content(&self) -> Option<&SessionContent> {
        self.content.as_ref()
    }

    pub fn show_ui(&self) -> bool {
        self.show_ui
    }

    pub fn pending_resume(&self) -> Option<&ReadingCheckpoint> {
        self.pending_resume.as_ref()
    }

    /// Completes loading with the document content and the fetched checkpoint
    /// (`None` when there is none or it could not be fetched).
    pub fn finish_loading(
        &mut self,
        content: SessionContent,
        checkpoint: Option<ReadingCheckpoint>,
    ) -> Option<SessionEffect> {
        if self.phase != SessionPhase::Loading {
            debug!(session_id = %self.session_id, "Load finished after the session moved on; ignored.");
            return None;
        }
        self.content = Some(content);

        let checkpoint = checkpoint.unwrap_or_default();
        self.progress = checkpoint.progress;

        if checkpoint.is_resumable() {
            info!(
                session_id = %self.session_id,
                progress = checkpoint.progress,
                "Saved position found, awaiting resume choice."
            );
            let excerpt = match &self.content {
                Some(SessionContent::PlainText(decoded)) => {
                    Some(resume_excerpt(&decoded.text, checkpoint.progress))
                }
                _ => None,
            };
            let effect = SessionEffect::PromptResume {
                progress: checkpoint.progress,
                excerpt,
            };
            self.pending_resume = Some(checkpoint);
            self.phase = SessionPhase::AwaitingResume;
            return Some(effect);
        }

        info!(session_id = %self.session_id, "Session active from the beginning.");
        self.phase = SessionPhase::Active;
        if self.kind == DocumentKind::Epub {
            self.pending_location = checkpoint
                .structural_location
                .map(|cfi| RendererCommand::LoadLocation { cfi });
        }
        self.take_pending_location()
    }

    /// Applies the reader's resume decision. Ignored outside `AwaitingResume`.
    pub fn resolve_resume(&mut self, choice: ResumeChoice) -> Option<SessionEffect> {
        if self.phase != SessionPhase::AwaitingResume {
            return None;
        }
        let checkpoint = self.pending_resume.take().unwrap_or_default();
        self.phase = SessionPhase::Active;
        info!(session_id = %self.session_id, ?choice, "Resume choice applied.");

        match choice {
            ResumeChoice::Restart => {
                self.progress = 0.0;
                None
            }
            ResumeChoice::Continue => match self.kind {
                DocumentKind::PlainText => {
                    self.pending_restore = Some(checkpoint.progress);
                    self.take_pending_restore()
                }
                DocumentKind::Epub => {
                    // Without a saved CFI the saved ratio is the best restore point.
                    self.pending_location = Some(match checkpoint.structural_location {
                        Some(cfi) => RendererCommand::LoadLocation { cfi },
                        None => RendererCommand::Seek {
                            percent: checkpoint.progress,
                        },
                    });
                    self.take_pending_location()
                }
            },
        }
    }

    /// Records the plain-text view geometry; may release a pending restore scroll.
    pub fn on_layout(&mut self, geometry: ScrollGeometry) -> Option<SessionEffect> {
        if self.phase == SessionPhase::Closed {
            return None;
        }
        self.geometry = Some(geometry);
        self.take_pending_restore()
    }

    /// Applies a plain-text scroll offset. Returns whether the position changed.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        if self.phase != SessionPhase::Active || self.kind != DocumentKind::PlainText {
            return false;
        }
        let Some(geometry) = self.geometry else {
            return false;
        };
        let max_scroll = geometry.max_scroll().max(1.0);
        self.progress = clamp_ratio(offset / max_scroll);
        true
    }

    /// Applies a raw renderer message; malformed input is dropped.
    pub fn on_renderer_message(&mut self, raw: &str) -> Option<SessionEffect> {
        let event = RendererEvent::parse(raw)?;
        self.on_renderer_event(event)
    }

    pub fn on_renderer_event(&mut self, event: RendererEvent) -> Option<SessionEffect> {
        if self.phase == SessionPhase::Closed || self.kind != DocumentKind::Epub {
            return None;
        }
        match event {
            RendererEvent::Ready => {
                debug!(session_id = %self.session_id, "Renderer locations ready.");
                self.locations_ready = true;
                self.take_pending_location()
            }
            RendererEvent::Progress {
                current,
                total,
                percent,
                cfi,
            } => {
                if !self.locations_ready || self.phase != SessionPhase::Active {
                    debug!(session_id = %self.session_id, "Relocation before the session is ready; ignored.");
                    return None;
                }
                self.progress = clamp_ratio(percent.unwrap_or(0.0) / 100.0);
                self.renderer_page = PageInfo {
                    current: page_number(current),
                    total: page_number(total),
                };
                if let Some(cfi) = cfi.filter(|c| !c.is_empty()) {
                    self.structural_location = Some(cfi);
                }
                None
            }
        }
    }

    /// Jumps to a ratio of the document, clamped to `[0, 1]`.
    pub fn seek(&mut self, ratio: f64) -> Option<SessionEffect> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        let ratio = clamp_ratio(ratio);
        match self.kind {
            DocumentKind::PlainText => {
                let geometry = self.geometry?;
                self.progress = ratio;
                Some(SessionEffect::ScrollTo {
                    offset: geometry.max_scroll().max(0.0) * ratio,
                })
            }
            DocumentKind::Epub => {
                if !self.locations_ready {
                    return None;
                }
                Some(SessionEffect::Renderer(RendererCommand::Seek { percent: ratio }))
            }
        }
    }

    /// Current and total page numbers for display.
    pub fn page_info(&self) -> PageInfo {
        match self.kind {
            DocumentKind::Epub => self.renderer_page,
            DocumentKind::PlainText => match self.geometry {
                Some(geometry) if geometry.viewport_height > 0.0 => {
                    let total =
                        ((geometry.content_height / geometry.viewport_height).round() as u32).max(1);
                    let current = ((self.progress * f64::from(total)).round() as u32).max(1);
                    PageInfo { current, total }
                }
                _ => PageInfo::default(),
            },
        }
    }

    /// Flips the visibility of the reader chrome and returns the new state.
    pub fn toggle_chrome(&mut self) -> bool {
        self.show_ui = !self.show_ui;
        self.show_ui
    }

    /// Ends the session and yields the checkpoint to persist.
    ///
    /// Returns `Some` exactly once. A session closed while still loading
    /// yields its initial position.
    pub fn close(&mut self) -> Option<ReadingCheckpoint> {
        let previous = std::mem::replace(&mut self.phase, SessionPhase::Closed);
        let elapsed = Utc::now() - self.opened_at;
        info!(
            session_id = %self.session_id,
            file_id = self.file_id,
            seconds = elapsed.num_seconds(),
            "Session closed."
        );
        match previous {
            SessionPhase::Closed => None,
            SessionPhase::Loading | SessionPhase::AwaitingResume | SessionPhase::Active => {
                let location = match self.kind {
                    DocumentKind::Epub => self.structural_location.clone(),
                    DocumentKind::PlainText => None,
                };
                Some(ReadingCheckpoint::new(self.progress, location))
            }
        }
    }

    fn take_pending_location(&mut self) -> Option<SessionEffect> {
        if self.phase != SessionPhase::Active || !self.locations_ready {
            return None;
        }
        self.pending_location.take().map(SessionEffect::Renderer)
    }

    fn take_pending_restore(&mut self) -> Option<SessionEffect> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        let geometry = self.geometry?;
        let max_scroll = geometry.max_scroll();
        if max_scroll <= 0.0 {
            return None;
        }
        let ratio = self.pending_restore.take()?;
        Some(SessionEffect::ScrollTo {
            offset: max_scroll * ratio,
        })
    }
}

fn page_number(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() && v >= 1.0 => v.round() as u32,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CFI: &str = "epubcfi(/6/4!/4/2)";

    fn text(body: &str) -> SessionContent {
        SessionContent::PlainText(DecodedText {
            text: body.to_string(),
            encoding: "utf-8",
        })
    }

    fn epub() -> SessionContent {
        SessionContent::Epub(Bytes::from_static(b"PK"))
    }

    fn progress_event(percent: f64, cfi: &str) -> RendererEvent {
        RendererEvent::Progress {
            current: Some(3.0),
            total: Some(10.0),
            percent: Some(percent),
            cfi: Some(cfi.to_string()),
        }
    }

    fn active_text() -> SessionState {
        let mut session = SessionState::new(1, DocumentKind::PlainText);
        session.finish_loading(text("hello"), None);
        session.on_layout(ScrollGeometry {
            content_height: 1100.0,
            viewport_height: 100.0,
        });
        session
    }

    #[test]
    fn no_checkpoint_goes_straight_to_active() {
        let mut session = SessionState::new(1, DocumentKind::PlainText);
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert_eq!(session.finish_loading(text("abc"), None), None);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn zero_progress_checkpoint_does_not_prompt() {
        let mut session = SessionState::new(1, DocumentKind::PlainText);
        let effect = session.finish_loading(text("abc"), Some(ReadingCheckpoint::new(0.0, None)));
        assert_eq!(effect, None);
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn positive_progress_prompts_for_resume() {
        let mut session = SessionState::new(1, DocumentKind::PlainText);
        let effect = session.finish_loading(text("abcdefghij"), Some(ReadingCheckpoint::new(0.42, None)));
        assert_eq!(session.phase(), SessionPhase::AwaitingResume);
        assert_eq!(
            effect,
            Some(SessionEffect::PromptResume {
                progress: 0.42,
                excerpt: Some("efghij".to_string()),
            })
        );
    }

    #[test]
    fn continue_restores_scroll_once_layout_is_known() {
        let mut session = SessionState::new(1, DocumentKind::PlainText);
        session.finish_loading(text("abc"), Some(ReadingCheckpoint::new(0.5, None)));
        assert_eq!(session.resolve_resume(ResumeChoice::Continue), None);
        assert_eq!(session.phase(), SessionPhase::Active);

        // A layout without scroll range cannot place the restore yet.
        let flat = ScrollGeometry {
            content_height: 100.0,
            viewport_height: 100.0,
        };
        assert_eq!(session.on_layout(flat), None);

        let tall = ScrollGeometry {
            content_height: 500.0,
            viewport_height: 100.0,
        };
        assert_eq!(session.on_layout(tall), Some(SessionEffect::ScrollTo { offset: 200.0 }));
        assert_eq!(session.on_layout(tall), None);
        assert_eq!(session.progress(), 0.5);
    }

    #[test]
    fn restart_resets_progress() {
        let mut session = SessionState::new(1, DocumentKind::Epub);
        session.finish_loading(epub(), Some(ReadingCheckpoint::new(0.65, Some(CFI.to_string()))));
        assert_eq!(session.resolve_resume(ResumeChoice::Restart), None);
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.on_renderer_event(RendererEvent::Ready), None);
    }

    #[test]
    fn resume_choice_outside_prompt_is_ignored() {
        let mut session = active_text();
        assert_eq!(session.resolve_resume(ResumeChoice::Continue), None);
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn continue_epub_loads_saved_location_after_ready() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        let effect = session.finish_loading(epub(), Some(ReadingCheckpoint::new(0.65, Some(CFI.to_string()))));
        assert!(matches!(effect, Some(SessionEffect::PromptResume { excerpt: None, .. })));
        assert_eq!(session.phase(), SessionPhase::AwaitingResume);

        assert_eq!(session.resolve_resume(ResumeChoice::Continue), None);
        assert_eq!(
            session.on_renderer_event(RendererEvent::Ready),
            Some(SessionEffect::Renderer(RendererCommand::LoadLocation { cfi: CFI.to_string() }))
        );
        // A repeated ready signal does not load the location twice.
        assert_eq!(session.on_renderer_event(RendererEvent::Ready), None);
    }

    #[test]
    fn continue_epub_without_location_seeks_to_saved_progress() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        session.finish_loading(epub(), Some(ReadingCheckpoint::new(0.65, None)));

        assert_eq!(session.resolve_resume(ResumeChoice::Continue), None);
        assert_eq!(
            session.on_renderer_event(RendererEvent::Ready),
            Some(SessionEffect::Renderer(RendererCommand::Seek { percent: 0.65 }))
        );
        assert_eq!(session.on_renderer_event(RendererEvent::Ready), None);
    }

    #[test]
    fn continue_after_ready_loads_location_immediately() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        session.finish_loading(epub(), Some(ReadingCheckpoint::new(0.65, Some(CFI.to_string()))));
        assert_eq!(session.on_renderer_event(RendererEvent::Ready), None);
        assert_eq!(
            session.resolve_resume(ResumeChoice::Continue),
            Some(SessionEffect::Renderer(RendererCommand::LoadLocation { cfi: CFI.to_string() }))
        );
    }

    #[test]
    fn saved_location_without_progress_loads_once_after_ready() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        let effect = session.finish_loading(epub(), Some(ReadingCheckpoint::new(0.0, Some(CFI.to_string()))));
        assert_eq!(effect, None);
        assert_eq!(session.phase(), SessionPhase::Active);

        let mut loads = 0;
        for _ in 0..3 {
            if let Some(SessionEffect::Renderer(RendererCommand::LoadLocation { cfi })) =
                session.on_renderer_event(RendererEvent::Ready)
            {
                assert_eq!(cfi, CFI);
                loads += 1;
            }
        }
        assert_eq!(loads, 1);
    }

    #[test]
    fn relocation_before_ready_is_ignored() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        session.finish_loading(epub(), None);
        session.on_renderer_event(progress_event(55.0, CFI));
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.structural_location(), None);

        session.on_renderer_event(RendererEvent::Ready);
        session.on_renderer_event(progress_event(55.0, CFI));
        assert!((session.progress() - 0.55).abs() < 1e-9);
        assert_eq!(session.structural_location(), Some(CFI));
        assert_eq!(session.page_info(), PageInfo { current: 3, total: 10 });
    }

    #[test]
    fn raw_renderer_messages_are_validated() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        session.finish_loading(epub(), None);
        assert_eq!(session.on_renderer_message("{broken"), None);
        session.on_renderer_message(r#"{"type":"ready"}"#);
        session.on_renderer_message(r#"{"type":"progress","current":0,"percent":250,"cfi":"epubcfi(/6/8)"}"#);
        assert_eq!(session.progress(), 1.0);
        assert_eq!(session.page_info(), PageInfo::default());
        assert_eq!(session.structural_location(), Some("epubcfi(/6/8)"));
    }

    #[test]
    fn scroll_updates_are_clamped_and_direction_agnostic() {
        let mut session = active_text();
        assert!(session.on_scroll(500.0));
        assert_eq!(session.progress(), 0.5);
        assert!(session.on_scroll(250.0));
        assert_eq!(session.progress(), 0.25);
        session.on_scroll(5000.0);
        assert_eq!(session.progress(), 1.0);
        session.on_scroll(-40.0);
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn scroll_before_layout_is_ignored() {
        let mut session = SessionState::new(1, DocumentKind::PlainText);
        session.finish_loading(text("abc"), None);
        assert!(!session.on_scroll(10.0));
    }

    #[test]
    fn text_seek_translates_ratio_to_offset_and_clamps() {
        let mut session = active_text();
        assert_eq!(session.seek(0.3), Some(SessionEffect::ScrollTo { offset: 300.0 }));
        assert_eq!(session.progress(), 0.3);
        assert_eq!(session.seek(1.8), Some(SessionEffect::ScrollTo { offset: 1000.0 }));
        assert_eq!(session.progress(), 1.0);
        assert_eq!(session.seek(-3.0), Some(SessionEffect::ScrollTo { offset: 0.0 }));
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn epub_seek_waits_for_ready_and_clamps() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        session.finish_loading(epub(), None);
        assert_eq!(session.seek(0.5), None);
        session.on_renderer_event(RendererEvent::Ready);
        assert_eq!(
            session.seek(1.5),
            Some(SessionEffect::Renderer(RendererCommand::Seek { percent: 1.0 }))
        );
    }

    #[test]
    fn text_pages_follow_scroll_geometry() {
        let mut session = active_text();
        assert_eq!(session.page_info(), PageInfo { current: 1, total: 11 });
        session.on_scroll(500.0);
        assert_eq!(session.page_info(), PageInfo { current: 6, total: 11 });
    }

    #[test]
    fn chrome_toggles() {
        let mut session = active_text();
        assert!(session.show_ui());
        assert!(!session.toggle_chrome());
        assert!(session.toggle_chrome());
    }

    #[test]
    fn close_yields_exactly_one_checkpoint_with_last_position() {
        let mut session = active_text();
        session.on_scroll(300.0);
        session.on_scroll(700.0);
        assert_eq!(session.close(), Some(ReadingCheckpoint::new(0.7, None)));
        assert_eq!(session.close(), None);
        assert_eq!(session.phase(), SessionPhase::Closed);
    }

    #[test]
    fn close_without_updates_saves_initial_position() {
        let mut session = active_text();
        assert_eq!(session.close(), Some(ReadingCheckpoint::new(0.0, None)));
    }

    #[test]
    fn close_while_awaiting_resume_keeps_saved_progress() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        session.finish_loading(epub(), Some(ReadingCheckpoint::new(0.65, Some(CFI.to_string()))));
        // No structural location was observed, so none is written back.
        assert_eq!(session.close(), Some(ReadingCheckpoint::new(0.65, None)));
    }

    #[test]
    fn epub_close_includes_last_observed_location() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        session.finish_loading(epub(), None);
        session.on_renderer_event(RendererEvent::Ready);
        session.on_renderer_event(progress_event(20.0, "epubcfi(/6/2)"));
        session.on_renderer_event(progress_event(10.0, "epubcfi(/6/1)"));
        assert_eq!(
            session.close(),
            Some(ReadingCheckpoint::new(0.1, Some("epubcfi(/6/1)".to_string())))
        );
    }

    #[test]
    fn close_while_loading_saves_initial_position_then_suppresses_everything() {
        let mut session = SessionState::new(7, DocumentKind::Epub);
        assert_eq!(session.close(), Some(ReadingCheckpoint::new(0.0, None)));
        assert_eq!(session.close(), None);
        assert_eq!(session.finish_loading(epub(), Some(ReadingCheckpoint::new(0.9, None))), None);
        assert_eq!(session.on_renderer_event(RendererEvent::Ready), None);
        session.on_renderer_event(progress_event(80.0, CFI));
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.phase(), SessionPhase::Closed);
    }

    #[test]
    fn events_after_close_are_ignored() {
        let mut session = active_text();
        session.on_scroll(100.0);
        session.close();
        assert!(!session.on_scroll(900.0));
        assert_eq!(session.seek(0.9), None);
        assert_eq!(session.progress(), 0.1);
    }
}
