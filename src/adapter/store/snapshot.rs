//! JSON snapshots of a [`MemoryStore`].
//!
//! Writes go to a sibling staging file, are synced to disk, and are then
//! renamed into place, so a crash mid-write leaves the previous snapshot
//! intact.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::memory::MemoryStore;
use crate::error::{Error, Result};
use crate::port::LedgerStore;

/// Staging file for `path`: the full file name with `.tmp` appended.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `store` to `path` atomically.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem step fails. The
/// staging file is removed on failure.
pub fn save<P: AsRef<Path>>(store: &MemoryStore, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(store)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    let mut file = fs::File::create(&staging)?;
    let cleanup_and_err = |e| {
        let _ = fs::remove_file(&staging);
        e
    };

    file.write_all(&json).map_err(cleanup_and_err)?;
    file.sync_all().map_err(cleanup_and_err)?;
    drop(file);
    fs::rename(&staging, path).map_err(cleanup_and_err)?;

    debug!(path = %path.display(), events = store.event_count(), "Snapshot written");
    Ok(())
}

/// Read a snapshot written by [`save`].
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid snapshot, or
/// describes a structurally inconsistent store.
pub fn load<P: AsRef<Path>>(path: P) -> Result<MemoryStore> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let store: MemoryStore = serde_json::from_slice(&bytes)?;
    store.check_structure().map_err(Error::Snapshot)?;
    info!(path = %path.display(), events = store.event_count(), "Snapshot loaded");
    Ok(store)
}
