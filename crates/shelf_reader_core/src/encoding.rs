//! crates/shelf_reader_core/src/encoding.rs
//!
//! Turns the raw bytes of an imported text file into readable text.
//!
//! A leading UTF-8 byte-order mark is authoritative. Otherwise each candidate
//! encoding is tried in a fixed order and the first one whose decode contains
//! fewer than 1% replacement characters wins. If none does, the buffer is
//! decoded as lossy UTF-8, so resolution never fails.

use crate::domain::DecodedText;
use encoding_rs::{Encoding, EUC_KR, UTF_8};
use tracing::{debug, warn};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF8_LABEL: &str = "utf-8";

/// A decode is accepted only when its replacement-character ratio is strictly below this.
pub const MAX_REPLACEMENT_RATIO: f64 = 0.01;

/// Candidate labels in trial order, tuned for Korean readers.
pub const DEFAULT_CANDIDATES: [&str; 4] = ["cp949", "utf-8", "euc-kr", "windows-1252"];

#[derive(Debug, Clone)]
pub struct EncodingResolver {
    candidates: Vec<(&'static str, &'static Encoding)>,
}

impl Default for EncodingResolver {
    fn default() -> Self {
        Self::with_candidates(&DEFAULT_CANDIDATES)
    }
}

impl EncodingResolver {
    /// Builds a resolver over the given encoding labels, in trial order.
    /// Labels neither the WHATWG table nor the Windows code-page aliases know
    /// are skipped.
    pub fn with_candidates(labels: &[&'static str]) -> Self {
        let candidates = labels
            .iter()
            .filter_map(|label| match encoding_for_label(label) {
                Some(encoding) => Some((*label, encoding)),
                None => {
                    warn!(label = *label, "Unknown encoding label ignored.");
                    None
                }
            })
            .collect();
        Self { candidates }
    }

    pub fn resolve(&self, buffer: &[u8]) -> String {
        self.resolve_document(buffer).text
    }

    /// Decodes `buffer`, reporting which encoding produced the text.
    pub fn resolve_document(&self, buffer: &[u8]) -> DecodedText {
        if let Some(rest) = buffer.strip_prefix(&UTF8_BOM) {
            debug!("UTF-8 byte-order mark found.");
            return decode_utf8_lossy(rest);
        }

        if buffer.is_empty() {
            return DecodedText {
                text: String::new(),
                encoding: UTF8_LABEL,
            };
        }

        for (label, encoding) in &self.candidates {
            let (text, _) = encoding.decode_without_bom_handling(buffer);
            let ratio = replacement_ratio(&text);
            if ratio < MAX_REPLACEMENT_RATIO {
                debug!(encoding = *label, ratio, "Resolved text encoding.");
                return DecodedText {
                    text: text.into_owned(),
                    encoding: *label,
                };
            }
            debug!(encoding = *label, ratio, "Candidate encoding rejected.");
        }

        warn!("No candidate encoding decoded cleanly, falling back to lossy UTF-8.");
        decode_utf8_lossy(buffer)
    }
}

/// Resolves `buffer` with the default candidate order.
pub fn resolve(buffer: &[u8]) -> String {
    EncodingResolver::default().resolve(buffer)
}

/// Looks up a label, accepting the Windows code-page names for Korean that
/// the WHATWG table lacks. `EUC_KR` in `encoding_rs` is the windows-949 superset.
fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    match label.trim().to_ascii_lowercase().as_str() {
        "cp949" | "ms949" | "uhc" => Some(EUC_KR),
        other => Encoding::for_label(other.as_bytes()),
    }
}

fn decode_utf8_lossy(buffer: &[u8]) -> DecodedText {
    let (text, _) = UTF_8.decode_without_bom_handling(buffer);
    DecodedText {
        text: text.into_owned(),
        encoding: UTF8_LABEL,
    }
}

fn replacement_ratio(text: &str) -> f64 {
    let (total, broken) = text.chars().fold((0usize, 0usize), |(total, broken), c| {
        (total + 1, broken + usize::from(c == char::REPLACEMENT_CHARACTER))
    });
    if total == 0 {
        return 0.0;
    }
    broken as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_hello() {
        assert_eq!(resolve(&[0x48, 0x65, 0x6C, 0x6C, 0x6F]), "Hello");
    }

    #[test]
    fn ascii_picks_the_first_candidate() {
        let decoded = EncodingResolver::default().resolve_document(b"plain ascii text");
        assert_eq!(decoded.encoding, "cp949");
        assert!(!decoded.text.contains(char::REPLACEMENT_CHARACTER));
    }

    #[test]
    fn empty_buffer_is_empty_text() {
        assert_eq!(resolve(&[]), "");
    }

    #[test]
    fn bom_is_authoritative() {
        let mut buffer = UTF8_BOM.to_vec();
        buffer.extend_from_slice("안녕".as_bytes());
        assert_eq!(resolve(&buffer), "안녕");

        // Invalid UTF-8 after a BOM is still decoded as UTF-8.
        let decoded = EncodingResolver::default().resolve_document(&[0xEF, 0xBB, 0xBF, 0xFF]);
        assert_eq!(decoded.text, "\u{FFFD}");
        assert_eq!(decoded.encoding, "utf-8");
    }

    #[test]
    fn bom_only_buffer_is_empty_text() {
        assert_eq!(resolve(&UTF8_BOM), "");
    }

    #[test]
    fn korean_legacy_bytes_decode_as_cp949() {
        let decoded = EncodingResolver::default().resolve_document(&[0xBE, 0xC8, 0xB3, 0xE7]);
        assert_eq!(decoded.text, "안녕");
        assert_eq!(decoded.encoding, "cp949");
    }

    #[test]
    fn mostly_ascii_korean_text_decodes_as_cp949() {
        let mut buffer = vec![b'a'; 600];
        buffer.extend_from_slice(&[0xBE, 0xC8, 0xB3, 0xE7]);
        let decoded = EncodingResolver::default().resolve_document(&buffer);
        assert_eq!(decoded.encoding, "cp949");
        assert!(decoded.text.ends_with("aa안녕"));
        assert_eq!(decoded.text.chars().count(), 602);
    }

    #[test]
    fn default_order_keeps_every_candidate() {
        let resolver = EncodingResolver::default();
        let labels: Vec<&str> = resolver.candidates.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, DEFAULT_CANDIDATES);
        assert_eq!(resolver.candidates[0].1, EUC_KR);
    }

    #[test]
    fn utf8_wins_when_the_legacy_decode_is_garbage() {
        let decoded = EncodingResolver::default().resolve_document("€€€€".as_bytes());
        assert_eq!(decoded.text, "€€€€");
        assert_eq!(decoded.encoding, "utf-8");
    }

    #[test]
    fn falls_back_to_lossy_utf8_when_every_candidate_fails() {
        let resolver = EncodingResolver::with_candidates(&["euc-kr", "utf-8"]);
        let decoded = resolver.resolve_document(&[0xFF, 0xFF]);
        assert_eq!(decoded.text, "\u{FFFD}\u{FFFD}");
        assert_eq!(decoded.encoding, "utf-8");
    }

    #[test]
    fn threshold_is_strictly_below_one_percent() {
        let resolver = EncodingResolver::with_candidates(&["euc-kr"]);

        let mut under = vec![b'a'; 199];
        under.push(0xFF);
        assert_eq!(resolver.resolve_document(&under).encoding, "euc-kr");

        let mut at = vec![b'a'; 99];
        at.push(0xFF);
        assert_eq!(resolver.resolve_document(&at).encoding, "utf-8");
    }

    #[test]
    fn unknown_labels_are_skipped() {
        let resolver = EncodingResolver::with_candidates(&["no-such-encoding", "euc-kr"]);
        assert_eq!(resolver.resolve_document(b"abc").encoding, "euc-kr");
    }
}
