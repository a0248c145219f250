//! Version parsing module

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Error type for version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version string \"{0}\"")]
    InvalidVersion(String),
    #[error("Version component out of range in \"{0}\"")]
    ComponentOverflow(String),
}

lazy_static! {
    // Numeric dotted prefix, optionally followed by `_<tag>`. Only the first
    // underscore separates the tag; anything after it is kept verbatim.
    static ref VERSION_RE: Regex = Regex::new(r"^([0-9]+(?:\.[0-9]+)*)(?:_(.*))?$").unwrap();
}

/// A dotted numeric version such as `1.87.0` or `1.88.0_rc1`.
///
/// Ordering looks at the numeric components only, left to right, without
/// padding shorter versions. Two versions with equal components but
/// different suffixes are ordered by their raw text so that sorting stays
/// total and deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    raw: String,
    components: Vec<u64>,
    suffix: Option<String>,
}

impl Version {
    /// Parse a version string.
    ///
    /// Everything after the first `_` is treated as a tag and ignored for
    /// comparison. Every dotted segment before it must be a non-negative
    /// integer.
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let caps = VERSION_RE
            .captures(version)
            .ok_or_else(|| VersionError::InvalidVersion(version.to_string()))?;

        let components = caps[1]
            .split('.')
            .map(|segment| {
                segment
                    .parse::<u64>()
                    .map_err(|_| VersionError::ComponentOverflow(version.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Version {
            raw: version.to_string(),
            components,
            suffix: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }

    /// The string this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric components, suffix excluded
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Tag following the underscore, if any
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Number of dotted components
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Compare numeric components only.
    pub fn numeric_cmp(&self, other: &Version) -> Ordering {
        self.components.cmp(&other.components)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric_cmp(other).then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
