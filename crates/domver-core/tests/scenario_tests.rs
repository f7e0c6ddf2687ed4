//! End-to-end scenarios over the versioned "Shop" fixtures: diff, render,
//! and plan output for each transition.

mod common;

use common::{shop_v1, shop_v2, shop_v3, shop_v4, snap};
use domver_core::diff::{compute_diff, ChangeKind};
use domver_core::plan::generate_plan;
use domver_core::render::render_markdown;

#[test]
fn adding_optional_email_is_non_breaking() {
    let diff = compute_diff(&snap(shop_v1()), &snap(shop_v2()));

    assert_eq!(diff.entity_changes.len(), 1);
    let customer = &diff.entity_changes[0];
    assert_eq!(customer.kind, ChangeKind::Modified);
    assert_eq!(customer.entity_name, "Customer");
    assert_eq!(customer.property_changes.len(), 1);

    let email = &customer.property_changes[0];
    assert_eq!(email.kind, ChangeKind::Added);
    assert_eq!(email.property_name, "Email");
    assert!(!email.is_breaking);
    assert!(!diff.has_breaking_changes());

    let markdown = render_markdown(&diff);
    assert!(!markdown.contains("## Breaking Changes"));
    assert!(markdown.contains("Customer.Email"));
}

#[test]
fn changing_name_type_is_breaking_and_planned() {
    let diff = compute_diff(&snap(shop_v2()), &snap(shop_v3()));

    let changes: Vec<_> = diff
        .entity_changes
        .iter()
        .flat_map(|e| e.property_changes.iter())
        .collect();
    assert_eq!(changes.len(), 1);
    let name = changes[0];
    assert_eq!(name.kind, ChangeKind::Modified);
    assert_eq!(name.old_type.as_deref(), Some("string"));
    assert_eq!(name.new_type.as_deref(), Some("guid"));
    assert!(name.is_breaking);
    assert!(diff.has_breaking_changes());

    let plan = generate_plan(&diff);
    let code_section = plan
        .split("## Recommended Actions")
        .nth(1)
        .expect("plan has an actions section");
    assert!(code_section.contains("Customer.Name"));
}

#[test]
fn removing_legacy_order_is_breaking_and_planned() {
    let diff = compute_diff(&snap(shop_v3()), &snap(shop_v4()));

    assert_eq!(diff.entity_changes.len(), 1);
    let removed = &diff.entity_changes[0];
    assert_eq!(removed.kind, ChangeKind::Removed);
    assert_eq!(removed.entity_name, "LegacyOrder");
    assert!(removed.is_breaking);

    let markdown = render_markdown(&diff);
    let breaking_section = markdown
        .split("## Breaking Changes")
        .nth(1)
        .expect("markdown has a breaking section");
    let first_heading_after = breaking_section.find("\n## ").unwrap_or(breaking_section.len());
    assert!(breaking_section[..first_heading_after].contains("LegacyOrder"));

    let plan = generate_plan(&diff);
    assert!(plan.contains("LegacyOrder"));
    assert!(plan.to_lowercase().contains("drop"));
}

#[test]
fn full_history_diff_accumulates_all_breaking_changes() {
    let diff = compute_diff(&snap(shop_v1()), &snap(shop_v4()));

    // v1 → v4 nets out to: Email added (non-breaking), Name type changed
    // (breaking), LegacyOrder removed (breaking).
    let descriptions = diff.breaking_descriptions();
    assert_eq!(descriptions.len(), 2);
    assert!(diff.has_breaking_changes());
    assert_eq!(diff.entity_changes.len(), 2);
}

#[test]
fn snapshot_round_trip_preserves_hash() {
    let original = snap(shop_v3());
    let json = serde_json::to_string(&original).unwrap();
    let restored: domver_core::Snapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.hash, original.hash);
    assert_eq!(
        domver_core::canonical::compute_hash(&restored.manifest).unwrap(),
        original.hash
    );
}
