//! Diff computation engine.
//!
//! Applies the same algorithm at every category level: build keyed lookups
//! from each side using the category's natural key, emit Removed/Added for
//! one-sided keys, and recurse into a nested comparison for shared keys,
//! folding any nested differences into a single Modified record. The engine
//! never fails partway through: malformed content must already have failed
//! at manifest construction, before reaching this module.

use crate::diff::classify::BreakingChangePolicy;
use crate::diff::model::{
    ChangeKind, ConfigurationChange, EntityChange, EnumChange, EnumValueChange, IndexChange,
    ManifestDiff, PropertyChange, RuleSetChange, ValueObjectChange,
};
use crate::model::{
    DomainManifest, Entity, EntityConfiguration, EnumDef, Property, RuleSet, ValueObject,
};
use crate::snapshot::Snapshot;
use std::collections::BTreeMap;

/// Compute a structured diff between two snapshots.
///
/// `before` and `after` need not share a domain name; that is the caller's
/// responsibility. Every record's breaking flag comes from the default
/// [`BreakingChangePolicy`] at the moment the record is created.
pub fn compute_diff(before: &Snapshot, after: &Snapshot) -> ManifestDiff {
    let policy = BreakingChangePolicy;

    let diff = ManifestDiff {
        domain_name: after.name.clone(),
        before_version: before.version.clone(),
        after_version: after.version.clone(),
        before_hash: before.hash.clone(),
        after_hash: after.hash.clone(),
        entity_changes: diff_entities(&before.manifest, &after.manifest, &policy),
        value_object_changes: diff_value_objects(&before.manifest, &after.manifest, &policy),
        enum_changes: diff_enums(&before.manifest, &after.manifest, &policy),
        rule_set_changes: diff_rule_sets(&before.manifest, &after.manifest, &policy),
        configuration_changes: diff_configurations(&before.manifest, &after.manifest, &policy),
    };

    tracing::debug!(
        domain = %diff.domain_name,
        before_version = %diff.before_version,
        after_version = %diff.after_version,
        total_changes = diff.total_changes(),
        breaking = diff.has_breaking_changes(),
        "Computed snapshot diff"
    );

    diff
}

/// Build a name-keyed lookup over a slice.
fn keyed<'a, T, K: Ord>(items: &'a [T], key: impl Fn(&'a T) -> K) -> BTreeMap<K, &'a T> {
    items.iter().map(|item| (key(item), item)).collect()
}

fn diff_entities(
    before: &DomainManifest,
    after: &DomainManifest,
    policy: &BreakingChangePolicy,
) -> Vec<EntityChange> {
    let before_map = keyed(&before.entities, |e| e.name.as_str());
    let after_map = keyed(&after.entities, |e| e.name.as_str());
    let mut changes = Vec::new();

    for (name, entity_before) in &before_map {
        match after_map.get(name) {
            None => changes.push(EntityChange {
                kind: ChangeKind::Removed,
                entity_name: entity_before.name.clone(),
                description: format!("Entity '{}' was removed", name),
                is_breaking: policy.entity_removed(),
                key_properties_changed: false,
                property_changes: Vec::new(),
            }),
            Some(entity_after) => {
                if let Some(change) = diff_entity_pair(entity_before, entity_after, policy) {
                    changes.push(change);
                }
            }
        }
    }

    for (name, _) in after_map.iter().filter(|(k, _)| !before_map.contains_key(*k)) {
        changes.push(EntityChange {
            kind: ChangeKind::Added,
            entity_name: name.to_string(),
            description: format!("Entity '{}' was added", name),
            is_breaking: policy.entity_added(),
            key_properties_changed: false,
            property_changes: Vec::new(),
        });
    }

    changes
}

/// Compare two entities sharing a name; None when nothing differs.
fn diff_entity_pair(
    before: &Entity,
    after: &Entity,
    policy: &BreakingChangePolicy,
) -> Option<EntityChange> {
    let property_changes = diff_properties(before, after, policy);
    let key_properties_changed = before.key_properties != after.key_properties;

    if property_changes.is_empty() && !key_properties_changed {
        return None;
    }

    let (description, is_breaking) = if key_properties_changed {
        (
            format!(
                "Entity '{}' key properties changed from [{}] to [{}]",
                before.name,
                join_sorted(&before.key_properties),
                join_sorted(&after.key_properties),
            ),
            policy.key_property_set_changed(),
        )
    } else {
        (format!("Entity '{}' was modified", before.name), false)
    };

    Some(EntityChange {
        kind: ChangeKind::Modified,
        entity_name: before.name.clone(),
        description,
        is_breaking,
        key_properties_changed,
        property_changes,
    })
}

fn join_sorted(set: &std::collections::BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(", ")
}

fn diff_properties(
    before: &Entity,
    after: &Entity,
    policy: &BreakingChangePolicy,
) -> Vec<PropertyChange> {
    let before_map = keyed(&before.properties, |p| p.name.as_str());
    let after_map = keyed(&after.properties, |p| p.name.as_str());
    let mut changes = Vec::new();

    for (name, prop_before) in &before_map {
        match after_map.get(name) {
            None => changes.push(PropertyChange {
                kind: ChangeKind::Removed,
                entity_name: before.name.clone(),
                property_name: prop_before.name.clone(),
                description: format!("Property '{}.{}' was removed", before.name, name),
                is_breaking: policy.property_removed(),
                old_type: Some(prop_before.type_name.clone()),
                new_type: None,
                old_required: Some(prop_before.required),
                new_required: None,
            }),
            Some(prop_after) => {
                if let Some(change) =
                    diff_property_pair(&before.name, prop_before, prop_after, policy)
                {
                    changes.push(change);
                }
            }
        }
    }

    for (name, prop_after) in after_map.iter().filter(|(k, _)| !before_map.contains_key(*k)) {
        let is_breaking = policy.property_added(prop_after.required);
        changes.push(PropertyChange {
            kind: ChangeKind::Added,
            entity_name: after.name.clone(),
            property_name: prop_after.name.clone(),
            description: format!(
                "Property '{}.{}' was added ({})",
                after.name,
                name,
                if prop_after.required { "required" } else { "optional" }
            ),
            is_breaking,
            old_type: None,
            new_type: Some(prop_after.type_name.clone()),
            old_required: None,
            new_required: Some(prop_after.required),
        });
    }

    changes
}

/// Compare two properties sharing a name.
///
/// A type change takes precedence over a required-flag transition; at most
/// one Modified record is emitted per property.
fn diff_property_pair(
    entity_name: &str,
    before: &Property,
    after: &Property,
    policy: &BreakingChangePolicy,
) -> Option<PropertyChange> {
    if before.type_name != after.type_name {
        return Some(PropertyChange {
            kind: ChangeKind::Modified,
            entity_name: entity_name.to_string(),
            property_name: before.name.clone(),
            description: format!(
                "Property '{}.{}' type changed from '{}' to '{}'",
                entity_name, before.name, before.type_name, after.type_name
            ),
            is_breaking: policy.property_type_changed(),
            old_type: Some(before.type_name.clone()),
            new_type: Some(after.type_name.clone()),
            old_required: Some(before.required),
            new_required: Some(after.required),
        });
    }

    if before.required != after.required {
        let transition = if after.required {
            "optional to required"
        } else {
            "required to optional"
        };
        return Some(PropertyChange {
            kind: ChangeKind::Modified,
            entity_name: entity_name.to_string(),
            property_name: before.name.clone(),
            description: format!(
                "Property '{}.{}' changed from {}",
                entity_name, before.name, transition
            ),
            is_breaking: policy.required_flag_changed(before.required, after.required),
            old_type: None,
            new_type: None,
            old_required: Some(before.required),
            new_required: Some(after.required),
        });
    }

    None
}

fn diff_value_objects(
    before: &DomainManifest,
    after: &DomainManifest,
    policy: &BreakingChangePolicy,
) -> Vec<ValueObjectChange> {
    let before_map = keyed(&before.value_objects, |v| v.name.as_str());
    let after_map = keyed(&after.value_objects, |v| v.name.as_str());
    let mut changes = Vec::new();

    for (name, vo_before) in &before_map {
        match after_map.get(name) {
            None => changes.push(ValueObjectChange {
                kind: ChangeKind::Removed,
                name: vo_before.name.clone(),
                description: format!("Value object '{}' was removed", name),
                is_breaking: policy.value_object_removed(),
            }),
            Some(vo_after) => {
                if value_object_differs(vo_before, vo_after) {
                    changes.push(ValueObjectChange {
                        kind: ChangeKind::Modified,
                        name: vo_before.name.clone(),
                        description: format!("Value object '{}' was modified", name),
                        is_breaking: policy.value_object_modified(),
                    });
                }
            }
        }
    }

    for (name, _) in after_map.iter().filter(|(k, _)| !before_map.contains_key(*k)) {
        changes.push(ValueObjectChange {
            kind: ChangeKind::Added,
            name: name.to_string(),
            description: format!("Value object '{}' was added", name),
            is_breaking: policy.value_object_added(),
        });
    }

    changes
}

/// Structural comparison, insensitive to property ordering.
fn value_object_differs(before: &ValueObject, after: &ValueObject) -> bool {
    let mut a = before.clone();
    let mut b = after.clone();
    a.properties.sort_by(|x, y| x.name.cmp(&y.name));
    b.properties.sort_by(|x, y| x.name.cmp(&y.name));
    a != b
}

fn diff_enums(
    before: &DomainManifest,
    after: &DomainManifest,
    policy: &BreakingChangePolicy,
) -> Vec<EnumChange> {
    let before_map = keyed(&before.enums, |e| e.name.as_str());
    let after_map = keyed(&after.enums, |e| e.name.as_str());
    let mut changes = Vec::new();

    for (name, enum_before) in &before_map {
        match after_map.get(name) {
            None => changes.push(EnumChange {
                kind: ChangeKind::Removed,
                name: enum_before.name.clone(),
                description: format!("Enum '{}' was removed", name),
                is_breaking: policy.enum_removed(),
                value_changes: Vec::new(),
            }),
            Some(enum_after) => {
                if let Some(change) = diff_enum_pair(enum_before, enum_after, policy) {
                    changes.push(change);
                }
            }
        }
    }

    for (name, _) in after_map.iter().filter(|(k, _)| !before_map.contains_key(*k)) {
        changes.push(EnumChange {
            kind: ChangeKind::Added,
            name: name.to_string(),
            description: format!("Enum '{}' was added", name),
            is_breaking: policy.enum_added(),
            value_changes: Vec::new(),
        });
    }

    changes
}

/// Compare two enums sharing a name, enumerating per-member changes.
fn diff_enum_pair(
    before: &EnumDef,
    after: &EnumDef,
    policy: &BreakingChangePolicy,
) -> Option<EnumChange> {
    let mut value_changes = Vec::new();

    for (member, old_value) in &before.values {
        match after.values.get(member) {
            None => value_changes.push(EnumValueChange {
                kind: ChangeKind::Removed,
                enum_name: before.name.clone(),
                value_name: member.clone(),
                description: format!("Enum value '{}.{}' was removed", before.name, member),
                is_breaking: policy.enum_value_removed(),
                old_value: Some(*old_value),
                new_value: None,
            }),
            Some(new_value) if new_value != old_value => {
                value_changes.push(EnumValueChange {
                    kind: ChangeKind::Modified,
                    enum_name: before.name.clone(),
                    value_name: member.clone(),
                    description: format!(
                        "Enum value '{}.{}' changed from {} to {}",
                        before.name, member, old_value, new_value
                    ),
                    is_breaking: policy.enum_value_modified(),
                    old_value: Some(*old_value),
                    new_value: Some(*new_value),
                });
            }
            Some(_) => {}
        }
    }

    for (member, new_value) in &after.values {
        if !before.values.contains_key(member) {
            value_changes.push(EnumValueChange {
                kind: ChangeKind::Added,
                enum_name: after.name.clone(),
                value_name: member.clone(),
                description: format!("Enum value '{}.{}' was added", after.name, member),
                is_breaking: policy.enum_value_added(),
                old_value: None,
                new_value: Some(*new_value),
            });
        }
    }

    let underlying_changed = before.underlying_type != after.underlying_type;
    if value_changes.is_empty() && !underlying_changed {
        return None;
    }

    Some(EnumChange {
        kind: ChangeKind::Modified,
        name: before.name.clone(),
        description: format!("Enum '{}' was modified", before.name),
        is_breaking: false,
        value_changes,
    })
}

fn diff_rule_sets(
    before: &DomainManifest,
    after: &DomainManifest,
    policy: &BreakingChangePolicy,
) -> Vec<RuleSetChange> {
    let before_map: BTreeMap<(&str, &str), &RuleSet> = before
        .rule_sets
        .iter()
        .map(|rs| ((rs.name.as_str(), rs.target_type.as_str()), rs))
        .collect();
    let after_map: BTreeMap<(&str, &str), &RuleSet> = after
        .rule_sets
        .iter()
        .map(|rs| ((rs.name.as_str(), rs.target_type.as_str()), rs))
        .collect();
    let mut changes = Vec::new();

    for (key, rs_before) in &before_map {
        match after_map.get(key) {
            None => changes.push(RuleSetChange {
                kind: ChangeKind::Removed,
                name: rs_before.name.clone(),
                target_type: rs_before.target_type.clone(),
                description: format!(
                    "Rule set '{}' for '{}' was removed",
                    rs_before.name, rs_before.target_type
                ),
                is_breaking: policy.rule_set_changed(),
            }),
            Some(rs_after) => {
                if rs_before != rs_after {
                    changes.push(RuleSetChange {
                        kind: ChangeKind::Modified,
                        name: rs_before.name.clone(),
                        target_type: rs_before.target_type.clone(),
                        description: format!(
                            "Rule set '{}' for '{}' was modified",
                            rs_before.name, rs_before.target_type
                        ),
                        is_breaking: policy.rule_set_changed(),
                    });
                }
            }
        }
    }

    for rs_after in after_map
        .iter()
        .filter(|(k, _)| !before_map.contains_key(*k))
        .map(|(_, rs)| rs)
    {
        changes.push(RuleSetChange {
            kind: ChangeKind::Added,
            name: rs_after.name.clone(),
            target_type: rs_after.target_type.clone(),
            description: format!(
                "Rule set '{}' for '{}' was added",
                rs_after.name, rs_after.target_type
            ),
            is_breaking: policy.rule_set_changed(),
        });
    }

    changes
}

fn diff_configurations(
    before: &DomainManifest,
    after: &DomainManifest,
    policy: &BreakingChangePolicy,
) -> Vec<ConfigurationChange> {
    let before_map = keyed(&before.configurations, |c| c.entity_name.as_str());
    let after_map = keyed(&after.configurations, |c| c.entity_name.as_str());
    let mut changes = Vec::new();

    for (name, config_before) in &before_map {
        match after_map.get(name) {
            None => changes.push(ConfigurationChange {
                kind: ChangeKind::Removed,
                entity_name: config_before.entity_name.clone(),
                description: format!("Configuration for '{}' was removed", name),
                is_breaking: policy.configuration_changed(),
                index_changes: Vec::new(),
            }),
            Some(config_after) => {
                if let Some(change) =
                    diff_configuration_pair(config_before, config_after, policy)
                {
                    changes.push(change);
                }
            }
        }
    }

    for (name, _) in after_map.iter().filter(|(k, _)| !before_map.contains_key(*k)) {
        changes.push(ConfigurationChange {
            kind: ChangeKind::Added,
            entity_name: name.to_string(),
            description: format!("Configuration for '{}' was added", name),
            is_breaking: policy.configuration_changed(),
            index_changes: Vec::new(),
        });
    }

    changes
}

/// Compare two configurations sharing an entity name, enumerating per-index
/// changes.
fn diff_configuration_pair(
    before: &EntityConfiguration,
    after: &EntityConfiguration,
    policy: &BreakingChangePolicy,
) -> Option<ConfigurationChange> {
    let before_indexes = keyed(&before.indexes, |i| i.name.as_str());
    let after_indexes = keyed(&after.indexes, |i| i.name.as_str());
    let mut index_changes = Vec::new();

    for (name, _) in &before_indexes {
        if !after_indexes.contains_key(name) {
            index_changes.push(IndexChange {
                kind: ChangeKind::Removed,
                entity_name: before.entity_name.clone(),
                index_name: name.to_string(),
                description: format!(
                    "Index '{}' on '{}' was removed",
                    name, before.entity_name
                ),
                is_breaking: policy.index_changed(),
            });
        }
    }
    for (name, _) in &after_indexes {
        if !before_indexes.contains_key(name) {
            index_changes.push(IndexChange {
                kind: ChangeKind::Added,
                entity_name: after.entity_name.clone(),
                index_name: name.to_string(),
                description: format!("Index '{}' on '{}' was added", name, after.entity_name),
                is_breaking: policy.index_changed(),
            });
        }
    }

    let other_fields_differ = {
        // Index ordering is presentation only; compare everything else.
        let mut a = before.clone();
        let mut b = after.clone();
        a.indexes.sort_by(|x, y| x.name.cmp(&y.name));
        b.indexes.sort_by(|x, y| x.name.cmp(&y.name));
        a.relationships.sort_by(|x, y| x.name.cmp(&y.name));
        b.relationships.sort_by(|x, y| x.name.cmp(&y.name));
        a != b
    };

    if index_changes.is_empty() && !other_fields_differ {
        return None;
    }

    Some(ConfigurationChange {
        kind: ChangeKind::Modified,
        entity_name: before.entity_name.clone(),
        description: format!("Configuration for '{}' was modified", before.entity_name),
        is_breaking: policy.configuration_changed(),
        index_changes,
    })
}
