//! Trace rewriting against a covered-lines set.
//!
//! Second pass of a diff run: copy the input trace to the output path,
//! zeroing the hit count of every entry the reference run already
//! covered. Everything else passes through byte-identical, so the
//! output stays a valid trace consumable by the same tooling as the
//! input.

use super::extract::CoveredLines;
use super::line::{classify, strip_terminator, SectionTracker, TraceLine};
use crate::utils::config::LINE_HIT_PREFIX;
use crate::utils::error::TraceError;
use log::debug;
use std::fs;
use std::path::Path;

/// Counters collected during a rewrite pass
#[derive(Debug, Default, Clone, Copy)]
pub struct RewriteStats {
    /// `SF:` sections encountered
    pub sections: usize,

    /// `DA:` entries encountered
    pub entries_seen: usize,

    /// `DA:` entries whose hit count was forced to zero
    pub entries_zeroed: usize,
}

/// Rewrite trace content, zeroing entries present in the covered set.
///
/// **Public** - pure core of the rewrite pass, used directly by tests
///
/// Substituted entries are emitted as `DA:<line>,0` with a fixed `\n`
/// terminator and any extra payload fields dropped; every other line
/// keeps its original bytes, terminator included.
///
/// # Arguments
/// * `content` - full text of the input trace
/// * `covered` - set built from the reference trace
///
/// # Returns
/// The rewritten trace text and the pass counters
///
/// # Errors
/// * `TraceError::MalformedHitEntry` - `DA:` payload with no comma
/// * `TraceError::OrphanHitEntry` - `DA:` entry outside any `SF:` section
pub fn rewrite_to_string(
    content: &str,
    covered: &CoveredLines,
) -> Result<(String, RewriteStats), TraceError> {
    let mut out = String::with_capacity(content.len());
    let mut stats = RewriteStats::default();
    let mut tracker = SectionTracker::new();

    for (idx, raw) in content.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;
        let parsed = classify(strip_terminator(raw), line_no)?;

        // Section state first: a DA: on this line must see the current
        // SF: context, not the previous one.
        tracker.observe(&parsed);

        match parsed {
            TraceLine::SourceFile(_) => {
                stats.sections += 1;
                out.push_str(raw);
            }
            TraceLine::Hit(entry) => {
                stats.entries_seen += 1;

                let file = tracker
                    .current()
                    .ok_or(TraceError::OrphanHitEntry { line: line_no })?;

                if covered.contains(file, entry.line) {
                    stats.entries_zeroed += 1;
                    out.push_str(LINE_HIT_PREFIX);
                    out.push_str(entry.line);
                    out.push_str(",0\n");
                } else {
                    out.push_str(raw);
                }
            }
            TraceLine::EndOfRecord | TraceLine::Other => out.push_str(raw),
        }
    }

    Ok((out, stats))
}

/// Rewrite a trace file against the covered set.
///
/// **Public** - main entry point for the rewrite pass
///
/// The output file is created or truncated; a pre-existing file at the
/// output path is silently overwritten. A failure mid-write can leave a
/// partial file behind.
///
/// # Errors
/// * `TraceError::Io` - unreadable input or unwritable output path
/// * parse errors as for [`rewrite_to_string`]
pub fn rewrite_trace(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    covered: &CoveredLines,
) -> Result<RewriteStats, TraceError> {
    let input = input.as_ref();
    let output = output.as_ref();

    debug!("Rewriting {} -> {}", input.display(), output.display());

    let content = fs::read_to_string(input)?;
    let (rewritten, stats) = rewrite_to_string(&content, covered)?;
    fs::write(output, rewritten)?;

    debug!(
        "Zeroed {} of {} entries across {} sections",
        stats.entries_zeroed, stats.entries_seen, stats.sections
    );

    Ok(stats)
}
