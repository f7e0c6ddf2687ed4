//! Validation rule schema.
//!
//! Rules are tracked by identity and presence only. The core never evaluates
//! rule predicates; rule-set changes are always classified non-breaking.

use serde::{Deserialize, Serialize};

/// A named collection of validation rules targeting one type.
///
/// Rule sets are unique by (name, target type) within a manifest. The rule
/// list and the included rule-set names are ordered collections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rule set name
    pub name: String,

    /// Type name the rules apply to
    pub target_type: String,

    /// Ordered rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,

    /// Names of other rule sets included by this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
}

/// A single validation rule, identified by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    /// Stable rule identifier
    pub id: String,

    /// Rule category (e.g. "format", "range")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,

    /// Type name the rule applies to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_type: String,

    /// Violation message
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Severity label (e.g. "error", "warning")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub severity: String,

    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}
