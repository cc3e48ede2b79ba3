//! The project manifest (`package.json`) as it is assembled during a run.
//!
//! - `value`: the tagged value tree that can also carry raw source expressions
//! - `merge`: how plugin fragments are merged into the draft
//! - `sort`: cosmetic key ordering applied before serialization

pub mod merge;
pub mod sort;
pub mod value;

pub use merge::{extend_manifest, ExtendOptions, MergeConflictPolicy};
pub use sort::canonicalize;
pub use value::{manifest_from_json, ManifestMap, ManifestValue, EXPRESSION_KEY};

use crate::{error::Result, ioutils::ensure_eol};

/// Serializes the manifest as 2-space indented JSON with a trailing newline.
pub fn to_manifest_json(pkg: &ManifestMap) -> Result<String> {
    Ok(ensure_eol(serde_json::to_string_pretty(pkg)?))
}
