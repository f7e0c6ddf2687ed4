//! Structural snapshot comparison.
//!
//! [`engine::compute_diff`] compares two snapshots category by category and
//! produces a [`model::ManifestDiff`]. Every change record carries a
//! precomputed description and a breaking flag obtained from
//! [`classify::BreakingChangePolicy`] at the moment of creation; downstream
//! consumers never re-derive semantics from raw before/after values.

pub mod classify;
pub mod engine;
pub mod model;

pub use classify::BreakingChangePolicy;
pub use engine::compute_diff;
pub use model::{
    ChangeKind, ConfigurationChange, EntityChange, EnumChange, EnumValueChange, IndexChange,
    ManifestDiff, PropertyChange, RuleSetChange, ValueObjectChange,
};
