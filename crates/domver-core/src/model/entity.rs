//! Entity and property schema.

use crate::model::is_false;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A domain entity: a named, keyed collection of properties.
///
/// Entity names are unique within a manifest and compared ordinally.
/// Property names are unique within an entity. The key-property set is
/// unordered; it is stored as a `BTreeSet` so the canonical encoding is
/// stable regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name (unique within the manifest)
    pub name: String,

    /// Fully qualified type name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub type_name: String,

    /// Namespace the entity type lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Mapped table name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    /// Mapped schema name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Ordered properties (unique names within the entity)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,

    /// Key property names (unordered set)
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub key_properties: BTreeSet<String>,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Entity {
    /// Create an entity with the given name and no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A single property of an entity or value object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Property {
    /// Property name (unique within its owner)
    pub name: String,

    /// Type name (e.g. "string", "int", "guid")
    pub type_name: String,

    /// Whether a value is mandatory
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// Whether the property holds a collection of values
    #[serde(default, skip_serializing_if = "is_false")]
    pub collection: bool,

    /// Maximum length for text/binary properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Numeric precision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    /// Numeric scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,

    /// Whether the property participates in optimistic concurrency
    #[serde(default, skip_serializing_if = "is_false")]
    pub concurrency: bool,

    /// Whether the property is computed by the store
    #[serde(default, skip_serializing_if = "is_false")]
    pub computed: bool,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Property {
    /// Create a property with the given name and type.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Mark the property as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
