//! Snapshot repository operations.
//!
//! Persists snapshots as pretty-printed JSON files and retrieves them by
//! path or (name, version). Failure modes: `NotFound` when the target is
//! absent, `Format` when persisted content cannot be parsed into a
//! well-formed snapshot.

use crate::atomic::atomic_write;
use crate::layout::StoreLayout;
use crate::version::compare_versions;
use domver_core::errors::{DomError, Result};
use domver_core::snapshot::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based snapshot store.
///
/// Holds only immutable layout configuration, so shared use across threads
/// is safe; coordination of concurrent writers for the same (name, version)
/// is left to the caller.
pub struct SnapshotStore {
    layout: StoreLayout,
}

impl SnapshotStore {
    /// Create a store over the given layout.
    pub fn new(layout: StoreLayout) -> Self {
        Self { layout }
    }

    /// Create a store rooted at `base_dir` with the default layout.
    pub fn open(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(StoreLayout::new(base_dir))
    }

    /// The layout this store resolves paths with.
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Persist a snapshot to its (name, version)-derived path.
    ///
    /// The write is atomic (temp→rename). Returns the path written.
    ///
    /// ## Errors
    ///
    /// - `DomError::InvalidInput` — snapshot name or version is empty
    /// - `DomError::Serialization` — JSON encoding failed
    /// - `DomError::Io` — filesystem write failed
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        if snapshot.name.trim().is_empty() || snapshot.version.trim().is_empty() {
            return Err(DomError::invalid_input(
                "save",
                "snapshot name and version must be non-empty",
            ));
        }

        let path = self.layout.snapshot_path(&snapshot.name, &snapshot.version);
        let json = serde_json::to_string_pretty(snapshot)?;
        atomic_write(&path, json.as_bytes())?;

        tracing::debug!(
            domain = %snapshot.name,
            version = %snapshot.version,
            path = %path.display(),
            size_bytes = json.len(),
            "Saved snapshot"
        );

        Ok(path)
    }

    /// Load a snapshot from an explicit path.
    ///
    /// ## Errors
    ///
    /// - `DomError::NotFound` — no file at the path
    /// - `DomError::Io` — the file exists but could not be read
    /// - `DomError::Format` — the content is not a well-formed snapshot
    pub fn load_path(&self, path: &Path) -> Result<Snapshot> {
        if !path.exists() {
            return Err(DomError::not_found(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|e| DomError::io("load_snapshot", e))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(|e| DomError::format(path.display().to_string(), e.to_string()))?;

        tracing::debug!(
            domain = %snapshot.name,
            version = %snapshot.version,
            path = %path.display(),
            "Loaded snapshot"
        );

        Ok(snapshot)
    }

    /// Load a snapshot by (name, version).
    pub fn load(&self, name: &str, version: &str) -> Result<Snapshot> {
        self.load_path(&self.layout.snapshot_path(name, version))
    }

    /// List all known versions of a domain, ascending by semantic version.
    ///
    /// A missing domain directory yields an empty list, not an error.
    pub fn list_versions(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.layout.domain_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|e| DomError::io("list_versions", e))?;
        let mut versions: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(|file_name| self.layout.version_from_file_name(name, file_name))
            })
            .collect();

        versions.sort_by(|a, b| compare_versions(a, b));
        Ok(versions)
    }

    /// Load the highest-versioned snapshot of a domain.
    ///
    /// ## Errors
    ///
    /// `DomError::NotFound` when no versions exist.
    pub fn get_latest(&self, name: &str) -> Result<Snapshot> {
        let versions = self.list_versions(name)?;
        let latest = versions
            .last()
            .ok_or_else(|| DomError::not_found(format!("no snapshots for domain '{}'", name)))?;
        self.load(name, latest)
    }

    /// True when a snapshot file exists for (name, version).
    pub fn exists(&self, name: &str, version: &str) -> bool {
        self.layout.snapshot_path(name, version).exists()
    }

    /// Delete the snapshot file for (name, version).
    ///
    /// ## Errors
    ///
    /// - `DomError::NotFound` — no such snapshot
    /// - `DomError::Io` — removal failed
    pub fn delete(&self, name: &str, version: &str) -> Result<()> {
        let path = self.layout.snapshot_path(name, version);
        if !path.exists() {
            return Err(DomError::not_found(path.display().to_string()));
        }
        fs::remove_file(&path).map_err(|e| DomError::io("delete_snapshot", e))?;

        tracing::debug!(
            domain = %name,
            version = %version,
            path = %path.display(),
            "Deleted snapshot"
        );

        Ok(())
    }
}
