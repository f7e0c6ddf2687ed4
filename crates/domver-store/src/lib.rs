//! DomVer Store - File-based snapshot repository
//!
//! Persists and retrieves snapshots produced by `domver-core`. A snapshot is
//! written as pretty-printed JSON to a path derived from its (name, version)
//! identity under a configurable base directory and file-naming pattern.
//!
//! This crate is the only place the toolkit touches the outside world:
//! everything in the core is pure computation, and this crate performs plain
//! blocking filesystem calls.

pub mod atomic;
pub mod layout;
pub mod repo;
pub mod version;

pub use domver_core::errors::{DomError, Result};
pub use layout::StoreLayout;
pub use repo::SnapshotStore;
pub use version::Version;
