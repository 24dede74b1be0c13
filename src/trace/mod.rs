//! Coverage-trace scanning, extraction, and rewriting.
//!
//! This module handles:
//! - Classifying the directives of the line-oriented trace format
//! - Building the covered-lines set from a reference trace
//! - Rewriting a second trace against that set
//! - Defining the diff-report schema

pub mod extract;
pub mod line;
pub mod rewrite;
pub mod schema;

// Re-export main types
pub use extract::{parse_covered_lines, read_covered_lines, CoveredLines, LineKey};
pub use line::{classify, strip_terminator, HitEntry, SectionTracker, TraceLine};
pub use rewrite::{rewrite_to_string, rewrite_trace, RewriteStats};
pub use schema::DiffReport;
