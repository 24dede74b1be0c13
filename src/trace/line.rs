//! Per-line classification of trace directives.
//!
//! A trace file is scanned one physical line at a time. Each line is
//! stripped of its terminator and classified into one of the directive
//! kinds; everything the scanner does not recognize stays opaque and is
//! handled by the caller (ignored on extraction, copied through on
//! rewrite).

use crate::utils::config::{END_OF_RECORD, LINE_HIT_PREFIX, SOURCE_FILE_PREFIX};
use crate::utils::error::TraceError;

/// One classified trace line.
///
/// Borrows from the raw line content, so classification allocates
/// nothing on the pass-through path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceLine<'a> {
    /// `SF:<path>` - opens a source-file section
    SourceFile(&'a str),

    /// `DA:<line>,<hits>[,<extra>]` - a line-hit entry
    Hit(HitEntry<'a>),

    /// `end_of_record` - closes the current section
    EndOfRecord,

    /// Any other directive; opaque to this tool
    Other,
}

/// Parsed payload of a `DA:` entry.
///
/// Both fields are kept as raw text: line numbers are opaque keys here,
/// never arithmetic operands, and normalizing them (e.g. "007" -> "7")
/// would break exact matching against the reference trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitEntry<'a> {
    /// Line number, verbatim
    pub line: &'a str,

    /// Hit count, verbatim; `"0"` means not covered
    pub hits: &'a str,
}

impl HitEntry<'_> {
    /// Whether this entry marks its line as covered
    pub fn is_covered(&self) -> bool {
        self.hits != "0"
    }
}

/// Strip the line terminator (`\n` or `\r\n`) from a raw physical line
///
/// **Public** - shared by both scan passes
pub fn strip_terminator(raw: &str) -> &str {
    let content = raw.strip_suffix('\n').unwrap_or(raw);
    content.strip_suffix('\r').unwrap_or(content)
}

/// Classify one terminator-stripped line.
///
/// **Public** - shared by both scan passes
///
/// # Arguments
/// * `content` - line content without its terminator
/// * `line_no` - 1-based physical line number, for error reporting
///
/// # Errors
/// * `TraceError::MalformedHitEntry` - `DA:` payload with no comma
pub fn classify(content: &str, line_no: usize) -> Result<TraceLine<'_>, TraceError> {
    if content == END_OF_RECORD {
        Ok(TraceLine::EndOfRecord)
    } else if let Some(path) = content.strip_prefix(SOURCE_FILE_PREFIX) {
        Ok(TraceLine::SourceFile(path))
    } else if let Some(payload) = content.strip_prefix(LINE_HIT_PREFIX) {
        Ok(TraceLine::Hit(parse_hit(payload, line_no)?))
    } else {
        Ok(TraceLine::Other)
    }
}

/// Parse a `DA:` payload into its line and hits fields
///
/// **Private** - internal helper for classify
///
/// The payload must carry at least `<line>,<hits>`; a third
/// comma-separated field (checksum or branch suffix) is tolerated and
/// left out of the parsed entry.
fn parse_hit(payload: &str, line_no: usize) -> Result<HitEntry<'_>, TraceError> {
    let mut fields = payload.splitn(3, ',');
    let line = fields.next().unwrap_or_default();
    let hits = fields.next().ok_or_else(|| TraceError::MalformedHitEntry {
        line: line_no,
        payload: payload.to_string(),
    })?;

    Ok(HitEntry { line, hits })
}

/// Tracks which source-file section the scan is currently inside.
///
/// The section context is the only state either pass carries: set by
/// `SF:`, cleared by `end_of_record`, undefined before the first
/// marker.
#[derive(Debug, Default)]
pub struct SectionTracker {
    current: Option<String>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one classified line to the section state.
    ///
    /// Must run before the caller inspects `Hit` entries on the same
    /// line, so a `DA:` is always keyed against the latest `SF:`.
    pub fn observe(&mut self, line: &TraceLine<'_>) {
        match line {
            TraceLine::EndOfRecord => self.current = None,
            TraceLine::SourceFile(path) => self.current = Some((*path).to_string()),
            _ => {}
        }
    }

    /// The active source file, if any section is open
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
