//! Directory snapshotting on a thinning schedule.
//!
//! This module handles:
//! - The checkpoint schedule (minutes since run start)
//! - Hard-link tree copies with remove-and-retry semantics

pub mod copy;
pub mod schedule;

// Re-export main types
pub use copy::{hard_link_tree, snapshot_tree};
pub use schedule::SnapshotSchedule;
