//! Watch command implementation.
//!
//! The watch command:
//! 1. Creates the snapshot destination directory
//! 2. Spawns the observed command
//! 3. Sleeps to each schedule checkpoint and snapshots the watched tree
//!
//! The loop runs until the process is terminated externally; it never
//! returns on its own.

use crate::snapshot::{snapshot_tree, SnapshotSchedule};
use crate::utils::config::SNAPSHOT_DIR_NAME_WIDTH;
use crate::utils::error::SnapshotError;
use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, info};
use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::{Duration, Instant};

/// Arguments for the watch command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct WatchArgs {
    /// Directory tree to snapshot
    pub directory: PathBuf,

    /// Destination directory for checkpoint snapshots
    pub snapshot_dir: PathBuf,

    /// Command to spawn and observe (program followed by its args)
    pub command: Vec<String>,
}

/// Validate watch arguments
///
/// **Public** - can be called before execute_watch for early validation
pub fn validate_args(args: &WatchArgs) -> Result<()> {
    if !args.directory.is_dir() {
        anyhow::bail!(
            "Watched directory not found: {}",
            args.directory.display()
        );
    }

    if args.command.is_empty() {
        anyhow::bail!("No command given to observe");
    }

    Ok(())
}

/// Execute the watch command
///
/// **Public** - main entry point called from main.rs
///
/// Spawns the observed command, then takes a hard-link snapshot of the
/// watched directory at every schedule checkpoint. Checkpoints already
/// in the past (because a copy ran long) are taken immediately.
///
/// # Errors
/// * Snapshot destination cannot be created
/// * Observed command cannot be spawned
/// * A partial snapshot cannot be cleaned up
pub fn execute_watch(args: WatchArgs) -> Result<()> {
    info!("Watching {} -> {}", args.directory.display(), args.snapshot_dir.display());

    std::fs::create_dir_all(&args.snapshot_dir)
        .context("Failed to create snapshot directory")?;

    let start = Instant::now();

    // Child handle kept so the process is not reaped early; the loop
    // below outlives it either way.
    let _child = spawn_observed(&args.command)?;

    for minutes in SnapshotSchedule::new() {
        sleep_until_checkpoint(start, minutes);

        info!(
            "Taking snapshot, t={}m, {}",
            minutes,
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        let dest = args
            .snapshot_dir
            .join(format!("{minutes:0width$}", width = SNAPSHOT_DIR_NAME_WIDTH));

        snapshot_tree(&args.directory, &dest)
            .with_context(|| format!("Failed to snapshot into {}", dest.display()))?;
    }

    Ok(())
}

/// Spawn the observed command
///
/// **Private** - internal helper for execute_watch
fn spawn_observed(command: &[String]) -> Result<Child, SnapshotError> {
    let (program, prog_args) = command.split_first().ok_or(SnapshotError::EmptyCommand)?;

    let child = Command::new(program)
        .args(prog_args)
        .spawn()
        .map_err(|source| SnapshotError::Spawn {
            command: program.clone(),
            source,
        })?;

    info!("Spawned '{}' (pid {})", program, child.id());

    Ok(child)
}

/// Block until `minutes` past `start`
///
/// **Private** - internal helper for execute_watch
fn sleep_until_checkpoint(start: Instant, minutes: u64) {
    let target = Duration::from_secs(minutes * 60);
    let elapsed = start.elapsed();

    if let Some(remaining) = target.checked_sub(elapsed) {
        debug!("Sleeping {:.0}s to checkpoint t={}m", remaining.as_secs_f64(), minutes);
        std::thread::sleep(remaining);
    } else {
        debug!("Checkpoint t={minutes}m already due, snapshotting now");
    }
}
