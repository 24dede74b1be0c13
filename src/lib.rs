//! lcov-delta
//!
//! Coverage-trace differencing and hard-link snapshotting for
//! long-running test campaigns.
//!
//! This crate provides the core implementation for the `lcov-delta`
//! CLI tool: a two-pass trace differ that zeroes lines already covered
//! by a reference run, and a watcher that snapshots a directory tree on
//! a thinning schedule while an observed command runs.

pub mod commands;
pub mod output;
pub mod snapshot;
pub mod trace;
pub mod utils;
