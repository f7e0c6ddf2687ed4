//! Diff rendering.
//!
//! Pure functions of a [`crate::diff::ManifestDiff`]; no I/O is performed.

pub mod markdown;
pub mod report;

pub use markdown::render_markdown;
pub use report::{build_report, render_json, DiffReport};
