//! Snapshot construction.
//!
//! A [`Snapshot`] wraps one canonicalized, hashed manifest with
//! name/version/timestamp identity. Snapshots are created once and never
//! mutated; the hash is a pure function of the manifest's canonical encoding.

use crate::canonical::{canonicalize, compute_hash};
use crate::errors::{DomError, Result};
use crate::model::DomainManifest;
use serde::{Deserialize, Serialize};

/// A named, versioned, hashed, timestamped wrapper around one manifest.
///
/// Serialized form per the persisted snapshot format:
/// `{ name, version, hash, createdAt, manifest }`, with the manifest's
/// collections in canonical order and default/empty fields omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Domain name
    pub name: String,

    /// Semantic version of the snapshotted manifest
    pub version: String,

    /// Content hash of the manifest's canonical encoding
    pub hash: String,

    /// RFC3339 timestamp of snapshot creation
    #[serde(rename = "createdAt")]
    pub created_at: String,

    /// The canonicalized manifest
    pub manifest: DomainManifest,
}

/// Create a snapshot from a fully materialized manifest.
///
/// Canonicalizes the manifest, computes its content hash, and stamps the
/// snapshot with an RFC3339 creation time. The manifest's `hash` field is
/// populated with the computed hash; `version_override`, when given,
/// replaces the manifest's own version for the snapshot identity.
///
/// ## Errors
///
/// - `DomError::InvalidInput` — manifest name or effective version is empty
/// - `DomError::Serialization` — canonical encoding failed
pub fn create_snapshot(
    manifest: DomainManifest,
    version_override: Option<&str>,
) -> Result<Snapshot> {
    if manifest.name.trim().is_empty() {
        return Err(DomError::invalid_input(
            "create_snapshot",
            "manifest name is empty",
        ));
    }
    let version = version_override
        .map(str::to_string)
        .unwrap_or_else(|| manifest.version.clone());
    if version.trim().is_empty() {
        return Err(DomError::invalid_input(
            "create_snapshot",
            "manifest version is empty and no override was given",
        ));
    }

    // The override is applied before hashing so the stored manifest
    // recanonicalizes to the same hash.
    let mut manifest = manifest;
    manifest.version = version.clone();

    let hash = compute_hash(&manifest)?;
    let mut canonical = canonicalize(&manifest);
    canonical.hash = Some(hash.clone());

    let snapshot = Snapshot {
        name: canonical.name.clone(),
        version,
        hash,
        created_at: chrono::Utc::now().to_rfc3339(),
        manifest: canonical,
    };

    tracing::debug!(
        domain = %snapshot.name,
        version = %snapshot.version,
        hash = %snapshot.hash,
        "Created snapshot"
    );

    Ok(snapshot)
}
