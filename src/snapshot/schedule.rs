//! Checkpoint schedule for directory snapshots.
//!
//! Checkpoints are minutes since the start of the observed run. The
//! sequence starts dense and thins out: early snapshots are minutes
//! apart while the observed process changes quickly, later ones land on
//! the hour once it has settled.

use crate::utils::config::{SCHEDULE_GROWTH_CEILING_MINUTES, SCHEDULE_STEP_MINUTES};

/// Unbounded, strictly increasing sequence of snapshot checkpoints.
///
/// Starts at 1 minute. While a term is at most
/// [`SCHEDULE_GROWTH_CEILING_MINUTES`], the next term is the current
/// one grown by 20% and rounded up; past the ceiling the sequence steps
/// by [`SCHEDULE_STEP_MINUTES`], rounded down to a multiple of the
/// step:
///
/// ```text
/// 1, 2, 3, 4, 5, 6, 8, 10, 12, 15, 18, 22, 27, 33, 40, 48, 58, 70,
/// 84, 101, 122, 180, 240, 300, ...
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotSchedule {
    next: u64,
}

impl SnapshotSchedule {
    pub fn new() -> Self {
        Self { next: 1 }
    }
}

impl Default for SnapshotSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SnapshotSchedule {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let current = self.next;

        self.next = if current <= SCHEDULE_GROWTH_CEILING_MINUTES {
            // ceil(current * 1.2) in integer arithmetic
            (current * 6 + 4) / 5
        } else {
            let grown = current + SCHEDULE_STEP_MINUTES;
            grown - grown % SCHEDULE_STEP_MINUTES
        };

        Some(current)
    }
}
