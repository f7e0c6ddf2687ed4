//! Markdown renderer for snapshot diffs.

use crate::diff::model::{ChangeKind, ManifestDiff};

/// Render a human-readable Markdown summary of a diff.
///
/// Layout: heading and summary line; a "Breaking Changes" section listing
/// every breaking description (only when any exist); then one section per
/// category. Each entry is prefixed with ⚠ when breaking, otherwise
/// ✅ Added / ❌ Removed / 📝 Modified by change kind.
pub fn render_markdown(diff: &ManifestDiff) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Schema Diff: {}\n\n", diff.domain_name));
    out.push_str(&format!(
        "**{}** → **{}**\n\n",
        diff.before_version, diff.after_version
    ));

    if !diff.has_changes() {
        out.push_str("No changes detected.\n");
        return out;
    }
    out.push_str(&format!("{} change(s) detected.\n\n", diff.total_changes()));

    let breaking = diff.breaking_descriptions();
    if !breaking.is_empty() {
        out.push_str("## Breaking Changes\n\n");
        for description in &breaking {
            out.push_str(&format!("- ⚠ {}\n", description));
        }
        out.push('\n');
    }

    if !diff.entity_changes.is_empty() {
        out.push_str("## Entities\n\n");
        for change in &diff.entity_changes {
            out.push_str(&entry(change.kind, change.is_breaking, &change.description));
            for prop in &change.property_changes {
                out.push_str("  ");
                out.push_str(&entry(prop.kind, prop.is_breaking, &prop.description));
            }
        }
        out.push('\n');
    }

    if !diff.value_object_changes.is_empty() {
        out.push_str("## Value Objects\n\n");
        for change in &diff.value_object_changes {
            out.push_str(&entry(change.kind, change.is_breaking, &change.description));
        }
        out.push('\n');
    }

    if !diff.enum_changes.is_empty() {
        out.push_str("## Enums\n\n");
        for change in &diff.enum_changes {
            out.push_str(&entry(change.kind, change.is_breaking, &change.description));
            for value in &change.value_changes {
                out.push_str("  ");
                out.push_str(&entry(value.kind, value.is_breaking, &value.description));
            }
        }
        out.push('\n');
    }

    if !diff.rule_set_changes.is_empty() {
        out.push_str("## Rule Sets\n\n");
        for change in &diff.rule_set_changes {
            out.push_str(&entry(change.kind, change.is_breaking, &change.description));
        }
        out.push('\n');
    }

    if !diff.configuration_changes.is_empty() {
        out.push_str("## Configurations\n\n");
        for change in &diff.configuration_changes {
            out.push_str(&entry(change.kind, change.is_breaking, &change.description));
            for index in &change.index_changes {
                out.push_str("  ");
                out.push_str(&entry(index.kind, index.is_breaking, &index.description));
            }
        }
        out.push('\n');
    }

    out
}

/// One bullet line with the kind/breaking prefix.
fn entry(kind: ChangeKind, is_breaking: bool, description: &str) -> String {
    let prefix = if is_breaking {
        "⚠"
    } else {
        match kind {
            ChangeKind::Added => "✅",
            ChangeKind::Removed => "❌",
            ChangeKind::Modified => "📝",
        }
    };
    format!("- {} {}\n", prefix, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_diff() -> ManifestDiff {
        ManifestDiff {
            domain_name: "Shop".to_string(),
            before_version: "1.0.0".to_string(),
            after_version: "1.1.0".to_string(),
            before_hash: "aa".repeat(32),
            after_hash: "bb".repeat(32),
            entity_changes: Vec::new(),
            value_object_changes: Vec::new(),
            enum_changes: Vec::new(),
            rule_set_changes: Vec::new(),
            configuration_changes: Vec::new(),
        }
    }

    #[test]
    fn test_no_changes_message() {
        let s = render_markdown(&empty_diff());
        assert!(s.contains("# Schema Diff: Shop"));
        assert!(s.contains("No changes detected."));
        assert!(!s.contains("## Breaking Changes"));
    }

    #[test]
    fn test_breaking_section_only_when_breaking() {
        use crate::diff::model::{ChangeKind, EntityChange};
        let mut diff = empty_diff();
        diff.entity_changes.push(EntityChange {
            kind: ChangeKind::Added,
            entity_name: "Customer".to_string(),
            description: "Entity 'Customer' was added".to_string(),
            is_breaking: false,
            key_properties_changed: false,
            property_changes: Vec::new(),
        });
        let s = render_markdown(&diff);
        assert!(!s.contains("## Breaking Changes"));
        assert!(s.contains("- ✅ Entity 'Customer' was added"));
    }
}
