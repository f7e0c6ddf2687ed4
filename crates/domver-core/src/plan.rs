//! Migration plan generation.
//!
//! Turns a diff into an ordered, prose remediation plan. The plan only
//! recommends actions; it never executes anything against a live store.
//! Output is deterministic: re-running the generator on an unchanged diff
//! reproduces byte-identical text outside the header's timestamp.

use crate::diff::model::{ChangeKind, ManifestDiff, PropertyChange};

/// Generate a migration plan, timestamped with the current time.
pub fn generate_plan(diff: &ManifestDiff) -> String {
    generate_plan_at(diff, &chrono::Utc::now().to_rfc3339())
}

/// Generate a migration plan with a caller-supplied generation timestamp.
///
/// Section order: header, early "no changes" exit, summary counts, breaking
/// changes verbatim, non-breaking changes, numbered Recommended Actions,
/// closing testing checklist.
pub fn generate_plan_at(diff: &ManifestDiff, generated_at: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Migration Plan: {}\n\n", diff.domain_name));
    out.push_str(&format!(
        "**From:** v{} → **To:** v{}\n\nGenerated: {}\n\n",
        diff.before_version, diff.after_version, generated_at
    ));

    if !diff.has_changes() {
        out.push_str("No changes detected. No migration is required.\n");
        return out;
    }

    let breaking = diff.breaking_descriptions();

    out.push_str("## Summary\n\n");
    out.push_str(&format!("- Total changes: {}\n", diff.total_changes()));
    out.push_str(&format!("- Breaking changes: {}\n\n", breaking.len()));

    if !breaking.is_empty() {
        out.push_str("## Breaking Changes\n\n");
        for description in &breaking {
            out.push_str(&format!("- {}\n", description));
        }
        out.push('\n');
    }

    let non_breaking = non_breaking_descriptions(diff);
    if !non_breaking.is_empty() {
        out.push_str("## Non-Breaking Changes\n\n");
        for description in &non_breaking {
            out.push_str(&format!("- {}\n", description));
        }
        out.push('\n');
    }

    out.push_str("## Recommended Actions\n\n");
    let mut step = 0;

    let removed_entities = removed_entity_names(diff);
    let breaking_properties = breaking_property_changes(diff);
    if !removed_entities.is_empty() || !breaking_properties.is_empty() {
        step += 1;
        out.push_str(&format!("{}. **Prepare a schema migration.**\n", step));
        for entity in &removed_entities {
            out.push_str(&format!("   - Drop the table for entity '{}'.\n", entity));
        }
        for prop in &breaking_properties {
            out.push_str(&match prop.kind {
                ChangeKind::Removed => {
                    format!("   - Drop the column for '{}'.\n", prop.qualified_name())
                }
                ChangeKind::Added => {
                    format!(
                        "   - Add a required column for '{}'.\n",
                        prop.qualified_name()
                    )
                }
                ChangeKind::Modified => {
                    format!(
                        "   - Alter the column for '{}' ({}).\n",
                        prop.qualified_name(),
                        alteration_detail(prop)
                    )
                }
            });
        }
        out.push('\n');
    }

    // Keyed off the structured required-flag transition, never off
    // description text.
    let newly_required = properties_becoming_required(diff);
    if !newly_required.is_empty() {
        step += 1;
        out.push_str(&format!(
            "{}. **Plan a data migration before tightening optionality.**\n",
            step
        ));
        for prop in &newly_required {
            out.push_str(&format!(
                "   - Backfill '{}' so every row has a value before it becomes required.\n",
                prop.qualified_name()
            ));
        }
        out.push('\n');
    }

    let required_additions = breaking_added_properties(diff);
    if !required_additions.is_empty() {
        step += 1;
        out.push_str(&format!(
            "{}. **Supply values for new required properties.**\n",
            step
        ));
        for prop in &required_additions {
            out.push_str(&format!(
                "   - Provide a default or backfill for '{}'.\n",
                prop.qualified_name()
            ));
        }
        out.push('\n');
    }

    if !breaking.is_empty() {
        step += 1;
        out.push_str(&format!(
            "{}. **Update consuming code for breaking changes.**\n",
            step
        ));
        for entity in &removed_entities {
            out.push_str(&format!(
                "   - Remove usages of entity '{}'.\n",
                entity
            ));
        }
        for prop in removed_properties(diff) {
            out.push_str(&format!(
                "   - Remove usages of property '{}'.\n",
                prop.qualified_name()
            ));
        }
        for prop in breaking_properties
            .iter()
            .filter(|p| p.kind == ChangeKind::Modified)
        {
            out.push_str(&format!(
                "   - Review usages of '{}'.\n",
                prop.qualified_name()
            ));
        }
        out.push('\n');
    }

    step += 1;
    out.push_str(&format!("{}. **Test before rollout.**\n", step));
    out.push_str("   - Run the full test suite against the migrated schema.\n");
    out.push_str("   - Verify data integrity on a copy of production data.\n");
    out.push_str("   - Rehearse the rollback path.\n");

    out
}

/// Descriptions of every non-breaking record, including nested ones,
/// in category order.
fn non_breaking_descriptions(diff: &ManifestDiff) -> Vec<String> {
    let mut out = Vec::new();
    for change in &diff.entity_changes {
        if !change.is_breaking && change.property_changes.is_empty() {
            out.push(change.description.clone());
        }
        for prop in &change.property_changes {
            if !prop.is_breaking {
                out.push(prop.description.clone());
            }
        }
    }
    for change in &diff.value_object_changes {
        if !change.is_breaking {
            out.push(change.description.clone());
        }
    }
    for change in &diff.enum_changes {
        if !change.is_breaking && change.value_changes.is_empty() {
            out.push(change.description.clone());
        }
        for value in &change.value_changes {
            if !value.is_breaking {
                out.push(value.description.clone());
            }
        }
    }
    for change in &diff.rule_set_changes {
        if !change.is_breaking {
            out.push(change.description.clone());
        }
    }
    for change in &diff.configuration_changes {
        if !change.is_breaking && change.index_changes.is_empty() {
            out.push(change.description.clone());
        }
        for index in &change.index_changes {
            if !index.is_breaking {
                out.push(index.description.clone());
            }
        }
    }
    out
}

fn removed_entity_names(diff: &ManifestDiff) -> Vec<String> {
    diff.entity_changes
        .iter()
        .filter(|c| c.kind == ChangeKind::Removed)
        .map(|c| c.entity_name.clone())
        .collect()
}

/// Every breaking property record, regardless of kind: removals, required
/// additions, type changes, optional→required transitions.
fn breaking_property_changes(diff: &ManifestDiff) -> Vec<&PropertyChange> {
    property_changes(diff).filter(|p| p.is_breaking).collect()
}

fn properties_becoming_required(diff: &ManifestDiff) -> Vec<&PropertyChange> {
    property_changes(diff)
        .filter(|p| p.kind == ChangeKind::Modified && p.became_required())
        .collect()
}

fn breaking_added_properties(diff: &ManifestDiff) -> Vec<&PropertyChange> {
    property_changes(diff)
        .filter(|p| p.kind == ChangeKind::Added && p.is_breaking)
        .collect()
}

fn removed_properties(diff: &ManifestDiff) -> Vec<&PropertyChange> {
    property_changes(diff)
        .filter(|p| p.kind == ChangeKind::Removed)
        .collect()
}

fn property_changes(diff: &ManifestDiff) -> impl Iterator<Item = &PropertyChange> {
    diff.entity_changes
        .iter()
        .flat_map(|c| c.property_changes.iter())
}

fn alteration_detail(prop: &PropertyChange) -> String {
    match (&prop.old_type, &prop.new_type) {
        (Some(old), Some(new)) => format!("type '{}' → '{}'", old, new),
        _ => "now required".to_string(),
    }
}
