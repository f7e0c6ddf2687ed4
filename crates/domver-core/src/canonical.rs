//! Canonicalization and content hashing.
//!
//! Turns a [`DomainManifest`] into an order-independent encoded document and
//! a stable content hash.
//!
//! ## Determinism guarantees
//!
//! - Same semantic content → same canonical bytes → same hash, independent of
//!   in-memory collection order, process, platform, or run.
//! - Fields holding their type's default value are omitted from the encoding
//!   (via the model's serde attributes), so additive no-op schema growth
//!   never perturbs the hash.
//! - The `hash` and `created_at` fields are cleared before encoding; the hash
//!   is a pure function of the manifest's semantic content.
//!
//! The hash is the lowercase hex SHA-256 of the canonical JSON encoding
//! (64 characters). This algorithm is fixed: snapshot files produced by one
//! process are hash-compatible with any other.

use crate::errors::Result;
use crate::model::DomainManifest;
use sha2::{Digest, Sha256};

/// Produce a canonically ordered copy of a manifest.
///
/// Imposes a total, stable order on every otherwise-unordered collection:
/// entities, value objects, and enums by name; rule sets by
/// (name, target type); configurations by entity name; sources by
/// (type, location); properties within an entity or value object by name;
/// indexes by name; relationships by name. Map-shaped fields (metadata, enum
/// values, key-property sets, property overrides) are `BTreeMap`/`BTreeSet`
/// in the model and need no extra sorting.
///
/// Ordered collections (rules within a rule set, index columns, foreign-key
/// lists) keep their caller-given order.
pub fn canonicalize(manifest: &DomainManifest) -> DomainManifest {
    let mut m = manifest.clone();

    m.entities.sort_by(|a, b| a.name.cmp(&b.name));
    for entity in &mut m.entities {
        entity.properties.sort_by(|a, b| a.name.cmp(&b.name));
    }

    m.value_objects.sort_by(|a, b| a.name.cmp(&b.name));
    for vo in &mut m.value_objects {
        vo.properties.sort_by(|a, b| a.name.cmp(&b.name));
    }

    m.enums.sort_by(|a, b| a.name.cmp(&b.name));

    m.rule_sets
        .sort_by(|a, b| (&a.name, &a.target_type).cmp(&(&b.name, &b.target_type)));

    m.configurations
        .sort_by(|a, b| a.entity_name.cmp(&b.entity_name));
    for config in &mut m.configurations {
        config.indexes.sort_by(|a, b| a.name.cmp(&b.name));
        config.relationships.sort_by(|a, b| a.name.cmp(&b.name));
    }

    m.sources
        .sort_by(|a, b| (&a.source_type, &a.location).cmp(&(&b.source_type, &b.location)));

    m
}

/// Encode a manifest into its canonical JSON document.
///
/// Two calls on semantically identical inputs match byte for byte. The
/// `hash` and `created_at` fields are cleared so the encoding depends only
/// on semantic content.
///
/// ## Errors
///
/// Returns `DomError::Serialization` if JSON encoding fails.
pub fn canonical_json(manifest: &DomainManifest) -> Result<String> {
    let mut canonical = canonicalize(manifest);
    canonical.hash = None;
    canonical.created_at = String::new();
    Ok(serde_json::to_string(&canonical)?)
}

/// Compute the content hash of a manifest.
///
/// SHA-256 over the canonical JSON encoding, hex-encoded (64 characters).
/// An empty manifest hashes successfully; so does a metadata-only one.
///
/// ## Errors
///
/// Returns `DomError::Serialization` if canonical encoding fails.
pub fn compute_hash(manifest: &DomainManifest) -> Result<String> {
    let canonical = canonical_json(manifest)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hex::encode(hasher.finalize());
    tracing::debug!(
        domain = %manifest.name,
        hash = %digest,
        size_bytes = canonical.len(),
        "Computed manifest content hash"
    );
    Ok(digest)
}
