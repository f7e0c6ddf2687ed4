//! Shared manifest fixtures for integration tests.
#![allow(dead_code)]
//!
//! Models the "Shop" domain across four versions:
//! - v1: Customer{Id:int required key, Name:string required} + LegacyOrder
//! - v2: adds Customer.Email:string optional
//! - v3: changes Customer.Name type from string to guid
//! - v4: removes LegacyOrder

use domver_core::model::{DomainManifest, Entity, Property};
use domver_core::snapshot::{create_snapshot, Snapshot};

pub fn customer_v1() -> Entity {
    let mut entity = Entity::new("Customer");
    entity.properties.push(Property::new("Id", "int").required());
    entity
        .properties
        .push(Property::new("Name", "string").required());
    entity.key_properties.insert("Id".to_string());
    entity
}

pub fn legacy_order() -> Entity {
    let mut entity = Entity::new("LegacyOrder");
    entity.properties.push(Property::new("Id", "int").required());
    entity.key_properties.insert("Id".to_string());
    entity
}

pub fn shop_v1() -> DomainManifest {
    let mut manifest = DomainManifest::new("Shop", "1.0.0");
    manifest.entities.push(customer_v1());
    manifest.entities.push(legacy_order());
    manifest
}

pub fn shop_v2() -> DomainManifest {
    let mut manifest = shop_v1();
    manifest.version = "2.0.0".to_string();
    manifest.entities[0]
        .properties
        .push(Property::new("Email", "string"));
    manifest
}

pub fn shop_v3() -> DomainManifest {
    let mut manifest = shop_v2();
    manifest.version = "3.0.0".to_string();
    let name = manifest.entities[0]
        .properties
        .iter_mut()
        .find(|p| p.name == "Name")
        .unwrap();
    name.type_name = "guid".to_string();
    manifest
}

pub fn shop_v4() -> DomainManifest {
    let mut manifest = shop_v3();
    manifest.version = "4.0.0".to_string();
    manifest.entities.retain(|e| e.name != "LegacyOrder");
    manifest
}

pub fn snap(manifest: DomainManifest) -> Snapshot {
    create_snapshot(manifest, None).unwrap()
}
