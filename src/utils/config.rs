//! Configuration and constants for the CLI.

use std::time::Duration;

/// Current diff-report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Tokens of the line-oriented trace format.
// A trace file is a flat list of directives: SF: opens a source-file
// section, DA: records one line's hit count, end_of_record closes the
// section. Everything else is opaque.
pub const SOURCE_FILE_PREFIX: &str = "SF:";
pub const LINE_HIT_PREFIX: &str = "DA:";
pub const END_OF_RECORD: &str = "end_of_record";

/// Checkpoint value (minutes) up to which the snapshot schedule grows
/// geometrically; above it the schedule steps in fixed increments
pub const SCHEDULE_GROWTH_CEILING_MINUTES: u64 = 120;

/// Fixed schedule increment once past the growth ceiling
pub const SCHEDULE_STEP_MINUTES: u64 = 60;

/// Zero-padded width of checkpoint directory names (e.g. "00012")
pub const SNAPSHOT_DIR_NAME_WIDTH: usize = 5;

/// Pause between attempts when a snapshot copy fails
pub const COPY_RETRY_DELAY: Duration = Duration::from_secs(1);
