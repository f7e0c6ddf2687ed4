//! Top-level manifest schema.

use crate::model::entity::{Entity, Property};
use crate::model::rules::RuleSet;
use crate::model::EntityConfiguration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete, versioned description of a domain.
///
/// Produced fully formed by upstream collaborators (builders, loaders) and
/// handed to the core as-is. The optional `hash` field is populated when the
/// manifest has been canonicalized and hashed into a snapshot; it never
/// participates in hash computation itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainManifest {
    /// Domain name
    pub name: String,

    /// Semantic version string (e.g. "1.2.0")
    pub version: String,

    /// RFC3339 creation timestamp (excluded from the content hash)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,

    /// Content hash of the canonical encoding, if computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Entities (unique names, ordinal comparison)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,

    /// Value objects (unique names)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_objects: Vec<ValueObject>,

    /// Enum definitions (unique names)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumDef>,

    /// Rule sets (unique by name + target type)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_sets: Vec<RuleSet>,

    /// Per-entity persistence configurations (unique by entity name)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configurations: Vec<EntityConfiguration>,

    /// Data sources (unique by type + location)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<DataSource>,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl DomainManifest {
    /// Create an empty manifest with the given name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }
}

/// An immutable value type owned by entities.
///
/// Compared by name in diffs; structural differences on a shared name
/// surface as a single non-breaking Modified record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueObject {
    /// Value object name (unique within the manifest)
    pub name: String,

    /// Properties of the value object
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

/// An enum definition: a named mapping from member names to numeric values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnumDef {
    /// Enum name (unique within the manifest)
    pub name: String,

    /// Underlying storage type name (e.g. "int")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub underlying_type: String,

    /// Member name → numeric value mapping
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, i64>,
}

/// A data source the domain is populated from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSource {
    /// Source type (e.g. "database", "file")
    pub source_type: String,

    /// Source location (connection string, path, URL)
    pub location: String,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}
