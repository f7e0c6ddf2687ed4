//! Determinism and order-independence properties of the canonicalizer.

mod common;

use common::{shop_v1, shop_v2};
use domver_core::canonical::{canonical_json, compute_hash};
use domver_core::model::{DataSource, DomainManifest, Entity, EnumDef, Property, Rule, RuleSet};
use proptest::prelude::*;

#[test]
fn canonicalizing_twice_is_byte_identical() {
    let manifest = shop_v2();
    assert_eq!(
        canonical_json(&manifest).unwrap(),
        canonical_json(&manifest).unwrap()
    );
    assert_eq!(
        compute_hash(&manifest).unwrap(),
        compute_hash(&manifest).unwrap()
    );
}

#[test]
fn hash_is_64_hex_chars() {
    let hash = compute_hash(&shop_v1()).unwrap();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn empty_manifest_canonicalizes() {
    let manifest = DomainManifest::new("Empty", "0.1.0");
    assert!(compute_hash(&manifest).is_ok());
}

#[test]
fn metadata_only_manifest_canonicalizes() {
    let mut manifest = DomainManifest::new("MetaOnly", "0.1.0");
    manifest
        .metadata
        .insert("owner".to_string(), "platform-team".to_string());
    assert!(compute_hash(&manifest).is_ok());
}

#[test]
fn metadata_insertion_order_does_not_change_hash() {
    let mut a = DomainManifest::new("Shop", "1.0.0");
    a.metadata.insert("owner".to_string(), "a-team".to_string());
    a.metadata.insert("region".to_string(), "eu".to_string());

    let mut b = DomainManifest::new("Shop", "1.0.0");
    b.metadata.insert("region".to_string(), "eu".to_string());
    b.metadata.insert("owner".to_string(), "a-team".to_string());

    assert_eq!(compute_hash(&a).unwrap(), compute_hash(&b).unwrap());
}

#[test]
fn rule_set_order_does_not_change_hash() {
    let rule_set = |name: &str, target: &str| RuleSet {
        name: name.to_string(),
        target_type: target.to_string(),
        rules: vec![Rule {
            id: format!("{}-1", name),
            ..Rule::default()
        }],
        includes: Vec::new(),
    };

    let mut a = DomainManifest::new("Shop", "1.0.0");
    a.rule_sets.push(rule_set("Checkout", "Order"));
    a.rule_sets.push(rule_set("Checkout", "Cart"));

    let mut b = DomainManifest::new("Shop", "1.0.0");
    b.rule_sets.push(rule_set("Checkout", "Cart"));
    b.rule_sets.push(rule_set("Checkout", "Order"));

    assert_eq!(compute_hash(&a).unwrap(), compute_hash(&b).unwrap());
}

#[test]
fn source_order_does_not_change_hash() {
    let source = |kind: &str, location: &str| DataSource {
        source_type: kind.to_string(),
        location: location.to_string(),
        metadata: Default::default(),
    };

    let mut a = DomainManifest::new("Shop", "1.0.0");
    a.sources.push(source("database", "db://primary"));
    a.sources.push(source("file", "/data/seed.csv"));

    let mut b = DomainManifest::new("Shop", "1.0.0");
    b.sources.push(source("file", "/data/seed.csv"));
    b.sources.push(source("database", "db://primary"));

    assert_eq!(compute_hash(&a).unwrap(), compute_hash(&b).unwrap());
}

#[test]
fn additive_default_fields_do_not_change_hash() {
    let base = shop_v1();
    let mut widened = base.clone();
    for entity in &mut widened.entities {
        for property in &mut entity.properties {
            property.collection = false;
            property.concurrency = false;
            property.computed = false;
        }
    }

    assert_eq!(compute_hash(&base).unwrap(), compute_hash(&widened).unwrap());
}

#[test]
fn key_property_insertion_order_does_not_change_hash() {
    let mut a = DomainManifest::new("Shop", "1.0.0");
    let mut entity = Entity::new("OrderLine");
    entity.properties.push(Property::new("OrderId", "int").required());
    entity.properties.push(Property::new("LineNo", "int").required());
    entity.key_properties.insert("OrderId".to_string());
    entity.key_properties.insert("LineNo".to_string());
    a.entities.push(entity);

    let mut b = DomainManifest::new("Shop", "1.0.0");
    let mut entity = Entity::new("OrderLine");
    entity.properties.push(Property::new("OrderId", "int").required());
    entity.properties.push(Property::new("LineNo", "int").required());
    entity.key_properties.insert("LineNo".to_string());
    entity.key_properties.insert("OrderId".to_string());
    b.entities.push(entity);

    assert_eq!(compute_hash(&a).unwrap(), compute_hash(&b).unwrap());
}

fn manifest_from_entity_names(names: &[String]) -> DomainManifest {
    let mut manifest = DomainManifest::new("Fuzz", "1.0.0");
    for name in names {
        let mut entity = Entity::new(name.clone());
        entity.properties.push(Property::new("Id", "int").required());
        manifest.entities.push(entity);
    }
    manifest.enums.push(EnumDef {
        name: "Status".to_string(),
        underlying_type: "int".to_string(),
        values: [("Active".to_string(), 0), ("Closed".to_string(), 1)]
            .into_iter()
            .collect(),
    });
    manifest
}

proptest! {
    #[test]
    fn entity_order_never_changes_hash(shuffled in Just(vec![
        "Customer".to_string(),
        "Order".to_string(),
        "OrderLine".to_string(),
        "Product".to_string(),
        "Warehouse".to_string(),
    ]).prop_shuffle()) {
        let ordered = vec![
            "Customer".to_string(),
            "Order".to_string(),
            "OrderLine".to_string(),
            "Product".to_string(),
            "Warehouse".to_string(),
        ];
        let a = manifest_from_entity_names(&ordered);
        let b = manifest_from_entity_names(&shuffled);
        prop_assert_eq!(compute_hash(&a).unwrap(), compute_hash(&b).unwrap());
    }
}
