//! Merges primary and auxiliary support into matrix rows.

use std::fmt;

use matrix_version::Version;

use crate::error::{MatrixError, Result};
use crate::stability::{ReleaseMarkers, StabilityLabel};
use crate::support::{AuxiliarySupport, PrimarySupport};

/// Order in which OS groups appear in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OsOrder {
    /// Sorted by OS identifier
    #[default]
    Lexicographic,
    /// Order of first appearance while scanning the primary rules
    FirstSeen,
}

impl OsOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsOrder::Lexicographic => "lexicographic",
            OsOrder::FirstSeen => "first-seen",
        }
    }
}

impl fmt::Display for OsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub primary_version: Version,
    pub os: String,
    pub auxiliary_version: Version,
    pub stability: StabilityLabel,
}

/// Produce one row per (OS, primary version) pair.
///
/// Rows are grouped by OS in `order`, and ascending by primary version
/// within a group. The next primary version is paired with the auxiliary
/// release candidate on OSes eligible for it; every other row gets the
/// OS's highest regular auxiliary version.
pub fn assemble(
    primary: &PrimarySupport,
    auxiliary: &AuxiliarySupport,
    auxiliary_name: &str,
    markers: &ReleaseMarkers,
    order: OsOrder,
) -> Result<Vec<MatrixRow>> {
    let mut oses: Vec<&str> = primary.table().os_names().collect();
    if order == OsOrder::Lexicographic {
        oses.sort_unstable();
    }

    let mut rows = Vec::new();
    for os in oses {
        let Some(versions) = primary.table().versions(os) else {
            continue;
        };
        let modern = primary.is_modern(os);

        for version in versions {
            let stability = markers.classify(version, modern);

            let auxiliary_version = match auxiliary.release_candidate() {
                Some(rc) if markers.is_next(version) && auxiliary.is_rc_eligible(os) => rc,
                _ => auxiliary.highest(os).ok_or_else(|| MatrixError::MissingAuxiliary {
                    table: auxiliary_name.to_string(),
                    os: os.to_string(),
                })?,
            };

            log::trace!("{} on {}: {} {}", version, os, auxiliary_version, stability);
            rows.push(MatrixRow {
                primary_version: version.clone(),
                os: os.to_string(),
                auxiliary_version: auxiliary_version.clone(),
                stability,
            });
        }
    }

    Ok(rows)
}
