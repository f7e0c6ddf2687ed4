//! Machine-readable diff report.
//!
//! A [`DiffReport`] is a flat object carrying domain identity, aggregate
//! counts, the breaking flag and descriptions, and one array per category
//! with each record's fields. Fields holding default or empty values are
//! omitted from the serialized form.

use crate::diff::model::{
    ConfigurationChange, EntityChange, EnumChange, ManifestDiff, RuleSetChange, ValueObjectChange,
};
use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Flat, machine-readable view of a [`ManifestDiff`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Domain name
    pub domain_name: String,
    /// Version of the `before` snapshot
    pub before_version: String,
    /// Version of the `after` snapshot
    pub after_version: String,
    /// Content hash of the `before` snapshot
    pub before_hash: String,
    /// Content hash of the `after` snapshot
    pub after_hash: String,
    /// Total top-level change records across all categories
    pub total_changes: usize,
    /// True when any record is breaking
    pub has_breaking_changes: bool,
    /// Flattened breaking descriptions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaking_changes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_changes: Vec<EntityChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_object_changes: Vec<ValueObjectChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_changes: Vec<EnumChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_set_changes: Vec<RuleSetChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configuration_changes: Vec<ConfigurationChange>,
}

/// Build the flat report from a diff.
pub fn build_report(diff: &ManifestDiff) -> DiffReport {
    DiffReport {
        domain_name: diff.domain_name.clone(),
        before_version: diff.before_version.clone(),
        after_version: diff.after_version.clone(),
        before_hash: diff.before_hash.clone(),
        after_hash: diff.after_hash.clone(),
        total_changes: diff.total_changes(),
        has_breaking_changes: diff.has_breaking_changes(),
        breaking_changes: diff.breaking_descriptions(),
        entity_changes: diff.entity_changes.clone(),
        value_object_changes: diff.value_object_changes.clone(),
        enum_changes: diff.enum_changes.clone(),
        rule_set_changes: diff.rule_set_changes.clone(),
        configuration_changes: diff.configuration_changes.clone(),
    }
}

/// Render the report as pretty-printed JSON.
///
/// ## Errors
///
/// Returns `DomError::Serialization` if JSON encoding fails.
pub fn render_json(diff: &ManifestDiff) -> Result<String> {
    Ok(serde_json::to_string_pretty(&build_report(diff))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_category_arrays_omitted() {
        let diff = ManifestDiff {
            domain_name: "Shop".to_string(),
            before_version: "1.0.0".to_string(),
            after_version: "1.0.0".to_string(),
            before_hash: "aa".repeat(32),
            after_hash: "aa".repeat(32),
            entity_changes: Vec::new(),
            value_object_changes: Vec::new(),
            enum_changes: Vec::new(),
            rule_set_changes: Vec::new(),
            configuration_changes: Vec::new(),
        };
        let json = render_json(&diff).unwrap();
        assert!(json.contains("\"domain_name\""));
        assert!(!json.contains("entity_changes"));
        assert!(!json.contains("breaking_changes"));
    }
}
