//! crates/shelf_reader_core/src/preview.rs
//!
//! Short text previews: the snippet stored when a file is imported, and the
//! excerpt shown next to the resume prompt.

use crate::domain::DocumentKind;
use crate::encoding::EncodingResolver;
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::OnceLock;
use tracing::warn;
use zip::ZipArchive;

const TEXT_PREVIEW_CHARS: usize = 100;
const EPUB_PREVIEW_CHARS: usize = 200;
const RESUME_EXCERPT_CHARS: usize = 150;
/// Upper bound on the decompressed bytes read from a single archive entry.
const MAX_ENTRY_BYTES: u64 = 4 * 1024 * 1024;

pub const PREVIEW_UNAVAILABLE: &str = "(preview unavailable)";
pub const EPUB_PACKAGE_MISSING: &str = "(EPUB metadata could not be read)";
pub const EPUB_CHAPTER_MISSING: &str = "(no chapter text found)";
pub const EPUB_PREVIEW_UNAVAILABLE: &str = "(EPUB preview unavailable)";

#[derive(Debug, thiserror::Error)]
enum PreviewError {
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no package document in archive")]
    MissingPackage,
    #[error("no chapter listed in package manifest")]
    MissingChapter,
}

/// Builds the preview stored for a freshly imported file. Never fails; a
/// placeholder is returned when the content cannot be read.
pub fn import_preview(kind: DocumentKind, bytes: &[u8], resolver: &EncodingResolver) -> String {
    match kind {
        DocumentKind::PlainText => {
            if bytes.is_empty() {
                return PREVIEW_UNAVAILABLE.to_string();
            }
            let text = resolver.resolve(bytes);
            format!("{}...", take_chars(&text, 0, TEXT_PREVIEW_CHARS))
        }
        DocumentKind::Epub => match first_chapter_text(bytes) {
            Ok(text) => format!("{}...", take_chars(&text, 0, EPUB_PREVIEW_CHARS)),
            Err(e) => {
                warn!("EPUB preview failed: {}", e);
                match e {
                    PreviewError::MissingPackage => EPUB_PACKAGE_MISSING,
                    PreviewError::MissingChapter => EPUB_CHAPTER_MISSING,
                    PreviewError::Archive(_) | PreviewError::Io(_) => EPUB_PREVIEW_UNAVAILABLE,
                }
                .to_string()
            }
        },
    }
}

/// The passage at `progress` through `text`, shown when asking whether to resume.
pub fn resume_excerpt(text: &str, progress: f64) -> String {
    let len = text.chars().count();
    let start = (len as f64 * progress.clamp(0.0, 1.0)).floor() as usize;
    take_chars(text, start, RESUME_EXCERPT_CHARS)
}

fn take_chars(text: &str, skip: usize, take: usize) -> String {
    text.chars().skip(skip).take(take).collect()
}

fn first_chapter_text(bytes: &[u8]) -> Result<String, PreviewError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let names: Vec<String> = archive.file_names().map(str::to_owned).collect();

    let package_path = names
        .iter()
        .find(|name| name.ends_with(".opf"))
        .or_else(|| names.iter().find(|name| name.to_lowercase().contains("opf")))
        .ok_or(PreviewError::MissingPackage)?
        .clone();
    let package = read_entry(&mut archive, &package_path, MAX_ENTRY_BYTES)?;

    let href = manifest_item_pattern()
        .captures(&package)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(PreviewError::MissingChapter)?;

    let base_dir = match package_path.rfind('/') {
        Some(idx) => &package_path[..=idx],
        None => "",
    };
    let chapter = read_entry(&mut archive, &format!("{}{}", base_dir, href), MAX_ENTRY_BYTES)?;
    Ok(html_to_text(&chapter))
}

// Package and chapter documents are XML, which EPUB requires to be UTF-8.
// Anything past `limit` bytes is cut off.
fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
    limit: u64,
) -> Result<String, PreviewError> {
    let entry = archive.by_name(name)?;
    let mut raw = Vec::new();
    entry.take(limit).read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn manifest_item_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"<item.*?id="[^"]*?".*?href="([^"]+)""#).expect("static manifest pattern")
    })
}

/// Reduces an XHTML chapter to its visible text, one paragraph per line.
fn html_to_text(html: &str) -> String {
    static HIDDEN: OnceLock<Regex> = OnceLock::new();
    static BREAKS: OnceLock<Regex> = OnceLock::new();
    static TAGS: OnceLock<Regex> = OnceLock::new();

    let hidden = HIDDEN.get_or_init(|| {
        Regex::new(r"(?is)<head\b.*?</head>|<style\b.*?</style>|<script\b.*?</script>")
            .expect("static hidden-block pattern")
    });
    let breaks = BREAKS.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</(p|div|h[1-6]|li)>").expect("static break pattern")
    });
    let tags = TAGS.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("static tag pattern"));

    let visible = hidden.replace_all(html, "");
    let broken = breaks.replace_all(&visible, "\n");
    let stripped = tags.replace_all(&broken, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
