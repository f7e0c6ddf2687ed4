//! Snapshot file layout.
//!
//! Paths derive from (name, version): a base directory, optionally one
//! subdirectory per domain name, and a file-name pattern parameterized by
//! `{name}` and `{version}`.

use domver_core::errors::{DomError, Result};
use std::path::{Path, PathBuf};

/// Default file-name pattern.
pub const DEFAULT_FILE_PATTERN: &str = "{name}_v{version}.snapshot.json";

/// Layout configuration for a snapshot store.
#[derive(Debug, Clone)]
pub struct StoreLayout {
    base_dir: PathBuf,
    use_domain_subdir: bool,
    file_pattern: String,
}

impl StoreLayout {
    /// Create a layout rooted at `base_dir` with the default pattern and
    /// per-domain subdirectories enabled.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            use_domain_subdir: true,
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
        }
    }

    /// Toggle the one-subdirectory-per-domain convention.
    pub fn with_domain_subdirs(mut self, enabled: bool) -> Self {
        self.use_domain_subdir = enabled;
        self
    }

    /// Replace the file-name pattern.
    ///
    /// ## Errors
    ///
    /// Returns `DomError::InvalidInput` when the pattern is missing the
    /// `{name}` or `{version}` placeholder.
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains("{name}") || !pattern.contains("{version}") {
            return Err(DomError::invalid_input(
                "with_file_pattern",
                format!(
                    "pattern '{}' must contain both {{name}} and {{version}}",
                    pattern
                ),
            ));
        }
        self.file_pattern = pattern;
        Ok(self)
    }

    /// Base directory of the store.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding snapshots of the given domain.
    pub fn domain_dir(&self, name: &str) -> PathBuf {
        if self.use_domain_subdir {
            self.base_dir.join(name)
        } else {
            self.base_dir.clone()
        }
    }

    /// Full path for one (name, version) snapshot.
    pub fn snapshot_path(&self, name: &str, version: &str) -> PathBuf {
        let file_name = self
            .file_pattern
            .replace("{name}", name)
            .replace("{version}", version);
        self.domain_dir(name).join(file_name)
    }

    /// Extract the version from a file name for the given domain.
    ///
    /// Returns `None` when the file name does not match the pattern with
    /// `{name}` substituted.
    pub fn version_from_file_name(&self, name: &str, file_name: &str) -> Option<String> {
        let pattern = self.file_pattern.replace("{name}", name);
        let (prefix, suffix) = pattern.split_once("{version}")?;
        let rest = file_name.strip_prefix(prefix)?;
        let version = rest.strip_suffix(suffix)?;
        if version.is_empty() {
            None
        } else {
            Some(version.to_string())
        }
    }
}
