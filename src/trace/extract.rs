//! Covered-lines extraction from a reference trace.
//!
//! First pass of a diff run: scan the reference trace once and collect
//! every (source file, line number) pair whose hit count is non-zero.
//! The resulting set is the sole input the rewrite pass consults.

use super::line::{classify, strip_terminator, SectionTracker, TraceLine};
use crate::utils::error::TraceError;
use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Composite key of one covered source line.
///
/// Both components are raw text lifted straight out of the trace, so a
/// key built from the reference trace matches an entry in the second
/// trace only when the two files spell it identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    /// Source-file path from the enclosing `SF:` marker
    pub file: String,

    /// Line-number token from the `DA:` entry, verbatim
    pub line: String,
}

impl LineKey {
    pub fn new(file: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: line.into(),
        }
    }
}

/// Set of lines a reference run already covered.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Default)]
pub struct CoveredLines {
    keys: HashSet<LineKey>,
}

impl CoveredLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given (file, line) pair was hit by the reference run
    pub fn contains(&self, file: &str, line: &str) -> bool {
        // Allocation-free lookup would need a borrowed key type; the
        // set stays small enough that building the probe key is fine.
        self.keys.contains(&LineKey::new(file, line))
    }

    pub fn insert(&mut self, key: LineKey) {
        self.keys.insert(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Build the covered-lines set from trace content.
///
/// **Public** - pure core of the extraction pass, used directly by tests
///
/// # Arguments
/// * `content` - full text of the reference trace
///
/// # Returns
/// The set of (source file, line number) pairs with non-zero hit counts
///
/// # Errors
/// * `TraceError::MalformedHitEntry` - `DA:` payload with no comma
/// * `TraceError::OrphanHitEntry` - `DA:` entry outside any `SF:` section
pub fn parse_covered_lines(content: &str) -> Result<CoveredLines, TraceError> {
    let mut covered = CoveredLines::new();
    let mut tracker = SectionTracker::new();

    for (idx, raw) in content.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;
        let parsed = classify(strip_terminator(raw), line_no)?;
        tracker.observe(&parsed);

        if let TraceLine::Hit(entry) = parsed {
            let file = tracker
                .current()
                .ok_or(TraceError::OrphanHitEntry { line: line_no })?;

            if entry.is_covered() {
                covered.insert(LineKey::new(file, entry.line));
            }
        }
    }

    Ok(covered)
}

/// Read a reference trace file and build its covered-lines set
///
/// **Public** - main entry point for the extraction pass
///
/// # Errors
/// * `TraceError::Io` - missing or unreadable reference file
/// * parse errors as for [`parse_covered_lines`]
pub fn read_covered_lines(path: impl AsRef<Path>) -> Result<CoveredLines, TraceError> {
    let path = path.as_ref();

    debug!("Reading reference trace: {}", path.display());

    let content = fs::read_to_string(path)?;
    let covered = parse_covered_lines(&content)?;

    debug!("Reference trace covers {} lines", covered.len());

    Ok(covered)
}
