//! Output JSON schema for diff-run reports.
//!
//! This module defines the structure of the optional report file
//! written after a diff run. Schema is versioned to allow future
//! evolution.

use super::extract::CoveredLines;
use super::rewrite::RewriteStats;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Machine-readable summary of one diff run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Path of the reference trace the covered set was built from
    pub reference: String,

    /// Path of the trace that was rewritten
    pub input: String,

    /// Path the rewritten trace was written to
    pub output: String,

    /// Size of the covered-lines set
    pub covered_lines: usize,

    /// `SF:` sections seen in the input trace
    pub sections: usize,

    /// `DA:` entries seen in the input trace
    pub entries_seen: usize,

    /// `DA:` entries whose hit count was forced to zero
    pub entries_zeroed: usize,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

impl DiffReport {
    /// Assemble a report from the two passes of a completed run
    pub fn from_run(
        reference: &Path,
        input: &Path,
        output: &Path,
        covered: &CoveredLines,
        stats: RewriteStats,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            reference: reference.display().to_string(),
            input: input.display().to_string(),
            output: output.display().to_string(),
            covered_lines: covered.len(),
            sections: stats.sections,
            entries_seen: stats.entries_seen,
            entries_zeroed: stats.entries_zeroed,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}
