//! Build-matrix generation from version compatibility rules.
//!
//! Given known versions of a primary library and an auxiliary dependency,
//! range rules mapping versions to operating systems, and the stable/next
//! release markers, [`MatrixBuilder`] produces one row per supported
//! (primary version, OS) pair, paired with the best auxiliary version and
//! a stability label.

pub mod assembler;
pub mod config;
pub mod error;
pub mod matrix;
pub mod rule;
pub mod stability;
pub mod support;

pub use assembler::{assemble, MatrixRow, OsOrder};
pub use config::{CompiledTables, MatrixConfig};
pub use error::{MatrixError, Result};
pub use matrix::{Matrix, MatrixBuilder, MatrixDocument, OutputFormat};
pub use rule::{CompatibilityRule, DependencyTable};
pub use stability::{ReleaseMarkers, StabilityLabel};
pub use support::{resolve_auxiliary, resolve_primary, AuxiliarySupport, PrimarySupport, SupportTable};
