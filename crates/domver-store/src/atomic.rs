//! Atomic write primitives
//!
//! Uses temp→rename so readers never observe a partially written snapshot.

use domver_core::errors::{DomError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique sibling temp path for a target file.
///
/// Suffixed with the process id and a per-process sequence number, so
/// concurrent writers of the same target never share a temp file.
fn temp_path(target_path: &Path) -> PathBuf {
    let mut name = target_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(
        ".{}.{}.tmp",
        process::id(),
        TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    target_path.with_file_name(name)
}

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| DomError::io("create_snapshot_dir", e))?;
    }

    let temp = temp_path(target_path);

    fs::write(&temp, content).map_err(|e| DomError::io("write_snapshot_temp", e))?;
    fs::rename(&temp, target_path).map_err(|e| DomError::io("rename_snapshot_temp", e))?;

    Ok(())
}
