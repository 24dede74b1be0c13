//! Hard-link directory snapshots.
//!
//! A snapshot is a recursive copy of the watched tree in which every
//! regular file is a hard link to the original. Snapshots are cheap in
//! both time and disk, and capture the tree's shape at one point of a
//! run even while the observed process keeps mutating it.

use crate::utils::config::COPY_RETRY_DELAY;
use crate::utils::error::SnapshotError;
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::thread;

/// Recursively snapshot `source` into `dest`, hard-linking files.
///
/// **Public** - single-attempt copy; most callers want [`snapshot_tree`]
///
/// `dest` must not exist yet. Directories are recreated, regular files
/// are hard-linked, symlinks are re-created pointing at their original
/// targets.
///
/// # Errors
/// * `SnapshotError::Io` - any filesystem failure; the destination may
///   be left partially populated
pub fn hard_link_tree(source: &Path, dest: &Path) -> Result<(), SnapshotError> {
    fs::create_dir(dest)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            hard_link_tree(&entry.path(), &target)?;
        } else if file_type.is_symlink() {
            let link_target = fs::read_link(entry.path())?;
            std::os::unix::fs::symlink(link_target, &target)?;
        } else {
            fs::hard_link(entry.path(), &target)?;
        }
    }

    Ok(())
}

/// Snapshot `source` into `dest`, retrying until the copy succeeds.
///
/// **Public** - main entry point for taking one snapshot
///
/// The observed process may be mutating `source` while we copy, so a
/// single attempt can fail on a file that vanished mid-walk. On
/// failure the partial destination is removed and the copy restarts
/// after a short pause. Does not return until a full copy lands.
///
/// # Errors
/// * `SnapshotError::Io` - the partial destination could not be removed
pub fn snapshot_tree(source: &Path, dest: &Path) -> Result<(), SnapshotError> {
    let mut attempt = 1u32;

    loop {
        match hard_link_tree(source, dest) {
            Ok(()) => {
                debug!("Snapshot {} complete (attempt {})", dest.display(), attempt);
                return Ok(());
            }
            Err(err) => {
                warn!(
                    "Snapshot copy into {} failed (attempt {}): {}",
                    dest.display(),
                    attempt,
                    err
                );
                remove_partial(dest)?;
                thread::sleep(COPY_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Remove a partially written snapshot directory
///
/// **Private** - internal helper for snapshot_tree
fn remove_partial(dest: &Path) -> Result<(), SnapshotError> {
    match fs::remove_dir_all(dest) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(SnapshotError::Io(err)),
    }
}
