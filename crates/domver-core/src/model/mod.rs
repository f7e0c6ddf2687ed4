//! Domain manifest data model.
//!
//! A [`DomainManifest`] is the complete, versioned description of a domain:
//! entities, value objects, enums, rule sets, per-entity persistence
//! configuration, and data sources. The model is strictly tree-shaped —
//! cross-entity references are plain type names and property-name lists,
//! never object pointers — so plain owned value types suffice throughout.
//!
//! All types are immutable once constructed by the caller and derive
//! `Serialize`/`Deserialize` with default-omitting field attributes, so the
//! canonical encoding drops any field holding its type's default value.

mod entity;
mod manifest;
mod rules;

pub use entity::{Entity, Property};
pub use manifest::{DataSource, DomainManifest, EnumDef, ValueObject};
pub use rules::{Rule, RuleSet};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Serde helper: skip serializing `false` flags.
pub(crate) fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Persistence configuration for a single entity.
///
/// Keyed by `entity_name` within a manifest. Tracks relational mapping
/// details: table/schema placement, key properties, per-property overrides,
/// indexes, and relationships.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityConfiguration {
    /// Name of the entity this configuration applies to
    pub entity_name: String,

    /// Table name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    /// Schema name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Key property names (unordered set)
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub key_properties: BTreeSet<String>,

    /// Per-property mapping overrides, keyed by property name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub property_overrides: BTreeMap<String, PropertyOverride>,

    /// Index definitions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexDef>,

    /// Relationship definitions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<RelationshipDef>,
}

/// Column-level mapping override for one property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyOverride {
    /// Column name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Column type override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,

    /// Default value expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// An index over one or more properties of an entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexDef {
    /// Index name (unique within the configuration)
    pub name: String,

    /// Ordered property names covered by the index
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,

    /// Whether the index enforces uniqueness
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique: bool,
}

/// A relationship from the configured entity to another entity.
///
/// The target is referenced by type name only; foreign keys are
/// property-name lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelationshipDef {
    /// Relationship name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Target entity type name
    pub target_entity: String,

    /// Foreign-key property names on the owning entity
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_key_properties: Vec<String>,
}
