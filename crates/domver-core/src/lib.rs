//! DomVer Core - Domain-configuration versioning toolkit
//!
//! This crate provides the deterministic core of DomVer:
//! - The domain manifest model (entities, value objects, enums, rule sets,
//!   configurations, sources, metadata)
//! - Canonicalization and content hashing (order-independent encoding,
//!   SHA-256)
//! - Snapshot construction
//! - Structural diffing with a centralized breaking-change policy
//! - Markdown and machine-readable diff rendering
//! - Migration plan generation
//!
//! Every component is a synchronous, side-effect-free function over
//! immutable inputs; no I/O happens here. Persistence lives in
//! `domver-store`.

pub mod canonical;
pub mod diff;
pub mod errors;
pub mod logging;
pub mod model;
pub mod plan;
pub mod render;
pub mod snapshot;

// Re-export commonly used types and entry points
pub use canonical::{canonical_json, canonicalize, compute_hash};
pub use diff::{compute_diff, BreakingChangePolicy, ChangeKind, ManifestDiff};
pub use errors::{DomError, Result};
pub use model::{DomainManifest, Entity, EnumDef, Property, RuleSet, ValueObject};
pub use plan::{generate_plan, generate_plan_at};
pub use render::{build_report, render_json, render_markdown, DiffReport};
pub use snapshot::{create_snapshot, Snapshot};
