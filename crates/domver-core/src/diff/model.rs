//! Diff output types.
//!
//! All change records carry a precomputed `description` and `is_breaking`
//! flag, assigned by the policy at creation time. A diff is transient: it is
//! recomputed fresh on every comparison and owned solely by the caller.

use serde::{Deserialize, Serialize};

/// The kind of a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

/// The structured diff between two snapshots of one domain.
///
/// Carries the identity of both compared snapshots plus one change list per
/// category. The aggregate views (`has_breaking_changes`, `total_changes`,
/// `breaking_descriptions`) are derived from the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestDiff {
    /// Domain name (taken from the `after` snapshot)
    pub domain_name: String,
    /// Version of the `before` snapshot
    pub before_version: String,
    /// Version of the `after` snapshot
    pub after_version: String,
    /// Content hash of the `before` snapshot
    pub before_hash: String,
    /// Content hash of the `after` snapshot
    pub after_hash: String,
    /// Entity changes, keyed by entity name
    pub entity_changes: Vec<EntityChange>,
    /// Value object changes, keyed by name
    pub value_object_changes: Vec<ValueObjectChange>,
    /// Enum changes, keyed by name
    pub enum_changes: Vec<EnumChange>,
    /// Rule set changes, keyed by (name, target type)
    pub rule_set_changes: Vec<RuleSetChange>,
    /// Configuration changes, keyed by entity name
    pub configuration_changes: Vec<ConfigurationChange>,
}

impl ManifestDiff {
    /// Total number of top-level change records across all categories.
    pub fn total_changes(&self) -> usize {
        self.entity_changes.len()
            + self.value_object_changes.len()
            + self.enum_changes.len()
            + self.rule_set_changes.len()
            + self.configuration_changes.len()
    }

    /// True when any category recorded at least one change.
    pub fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }

    /// True when any record, including nested property and enum-value
    /// records, is breaking.
    pub fn has_breaking_changes(&self) -> bool {
        self.entity_changes
            .iter()
            .any(|c| c.is_breaking || c.property_changes.iter().any(|p| p.is_breaking))
            || self.value_object_changes.iter().any(|c| c.is_breaking)
            || self
                .enum_changes
                .iter()
                .any(|c| c.is_breaking || c.value_changes.iter().any(|v| v.is_breaking))
            || self.rule_set_changes.iter().any(|c| c.is_breaking)
            || self
                .configuration_changes
                .iter()
                .any(|c| c.is_breaking || c.index_changes.iter().any(|i| i.is_breaking))
    }

    /// Flattened list of every breaking description, in category order.
    ///
    /// A Modified entity record that is breaking only through nested
    /// property changes contributes the property descriptions, not its own.
    pub fn breaking_descriptions(&self) -> Vec<String> {
        let mut out = Vec::new();
        for change in &self.entity_changes {
            if change.is_breaking {
                out.push(change.description.clone());
            }
            for prop in &change.property_changes {
                if prop.is_breaking {
                    out.push(prop.description.clone());
                }
            }
        }
        for change in &self.value_object_changes {
            if change.is_breaking {
                out.push(change.description.clone());
            }
        }
        for change in &self.enum_changes {
            if change.is_breaking {
                out.push(change.description.clone());
            }
            for value in &change.value_changes {
                if value.is_breaking {
                    out.push(value.description.clone());
                }
            }
        }
        for change in &self.rule_set_changes {
            if change.is_breaking {
                out.push(change.description.clone());
            }
        }
        for change in &self.configuration_changes {
            if change.is_breaking {
                out.push(change.description.clone());
            }
            for index in &change.index_changes {
                if index.is_breaking {
                    out.push(index.description.clone());
                }
            }
        }
        out
    }
}

/// A change to one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityChange {
    pub kind: ChangeKind,
    pub entity_name: String,
    pub description: String,
    pub is_breaking: bool,
    /// True when the unordered key-property set differs (always breaking)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub key_properties_changed: bool,
    /// Nested property changes for Modified records
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_changes: Vec<PropertyChange>,
}

/// A change to one property of an entity.
///
/// `old_required`/`new_required` carry the structured required-flag
/// transition; consumers key data-migration detection off these booleans,
/// never off the rendered description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyChange {
    pub kind: ChangeKind,
    pub entity_name: String,
    pub property_name: String,
    pub description: String,
    pub is_breaking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_required: Option<bool>,
}

impl PropertyChange {
    /// Qualified `Entity.Property` name.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.entity_name, self.property_name)
    }

    /// True for the optional→required transition.
    pub fn became_required(&self) -> bool {
        self.old_required == Some(false) && self.new_required == Some(true)
    }
}

/// A change to one value object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueObjectChange {
    pub kind: ChangeKind,
    pub name: String,
    pub description: String,
    pub is_breaking: bool,
}

/// A change to one enum definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumChange {
    pub kind: ChangeKind,
    pub name: String,
    pub description: String,
    pub is_breaking: bool,
    /// Nested member changes for Modified records
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_changes: Vec<EnumValueChange>,
}

/// A change to one enum member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueChange {
    pub kind: ChangeKind,
    pub enum_name: String,
    pub value_name: String,
    pub description: String,
    pub is_breaking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<i64>,
}

/// A change to one rule set. Never breaking under the default policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetChange {
    pub kind: ChangeKind,
    pub name: String,
    pub target_type: String,
    pub description: String,
    pub is_breaking: bool,
}

/// A change to one entity configuration. Never breaking under the default
/// policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationChange {
    pub kind: ChangeKind,
    pub entity_name: String,
    pub description: String,
    pub is_breaking: bool,
    /// Nested index changes for Modified records
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index_changes: Vec<IndexChange>,
}

/// A change to one index within an entity configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexChange {
    pub kind: ChangeKind,
    pub entity_name: String,
    pub index_name: String,
    pub description: String,
    pub is_breaking: bool,
}
