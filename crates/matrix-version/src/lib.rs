//! Dotted version parsing and comparison for build matrices
//!
//! Versions are numeric dotted tuples with an optional `_tag` suffix
//! (`1.88.0_rc1`). Comparison only looks at the numeric tuple.

mod comparator;
mod range;
mod version;

pub use comparator::Comparator;
pub use range::VersionRange;
pub use version::{Version, VersionError};
