//! Streamed-card parsing
//!
//! Chat output is plain text with inline `[REC]Title###Year###Type###
//! Reason[/REC]` blocks. The buffer grows chunk by chunk and is re-parsed
//! from scratch on every call, so parsing must stay pure, idempotent and
//! tolerant of blocks that are still streaming in.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{DisplaySegment, MediaKind, RecCard};

static REC_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[REC\](.+?)\[/REC\]").expect("rec block regex should compile")
});

/// Reason shown when the model leaves the field blank.
pub const FALLBACK_REASON: &str = "Great pick!";

/// Result of one parse pass over the accumulated chat buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStream {
    pub segments: Vec<DisplaySegment>,
    /// Unparsed tail, possibly an in-progress block still streaming in.
    /// Callers display it verbatim while streaming and re-parse it once
    /// more text arrives; it is never emitted as a segment.
    pub remainder: String,
}

/// Splits the accumulated chat buffer into text segments and complete
/// recommendation cards.
///
/// Complete `[REC]...[/REC]` blocks are matched left to right without
/// overlap. Text strictly between matches is trimmed and emitted when
/// non-empty. An unterminated `[REC]` and everything after it land in
/// `remainder`; malformed input never panics.
pub fn parse_stream_buffer(buffer: &str) -> ParsedStream {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in REC_BLOCK.captures_iter(buffer) {
        let whole = caps.get(0).expect("group 0 is the whole match");

        let text_before = buffer[last_end..whole.start()].trim();
        if !text_before.is_empty() {
            segments.push(DisplaySegment::Text {
                content: text_before.to_string(),
            });
        }

        segments.push(DisplaySegment::Rec {
            card: parse_card(&caps[1]),
        });
        last_end = whole.end();
    }

    ParsedStream {
        segments,
        remainder: buffer[last_end..].to_string(),
    }
}

/// Splits a block interior on `###` into title, year, type and reason.
///
/// Only the first three separators are structural: the reason field keeps
/// any further `###` verbatim. Absent or blank fields fall back to their
/// defaults.
fn parse_card(inner: &str) -> RecCard {
    let mut fields = inner.splitn(4, "###");

    let title = fields.next().unwrap_or("").trim().to_string();

    let year = match fields.next().map(str::trim) {
        Some(y) if !y.is_empty() => y.to_string(),
        _ => "N/A".to_string(),
    };

    let kind = match fields.next().map(|k| k.trim().to_lowercase()) {
        Some(k) if k == "tv" => MediaKind::Tv,
        Some(k) if k == "anime" => MediaKind::Anime,
        _ => MediaKind::Movie,
    };

    let reason = match fields.next().map(str::trim) {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => FALLBACK_REASON.to_string(),
    };

    RecCard {
        title,
        year,
        kind,
        reason,
    }
}
