//! Inclusive version ranges

use std::fmt;

use crate::version::Version;

/// An inclusive range of versions with an optional upper bound.
///
/// A missing upper bound means the range tracks the newest known version
/// and beyond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    min: Version,
    max: Option<Version>,
}

impl VersionRange {
    /// Create a new range
    pub fn new(min: Version, max: Option<Version>) -> Self {
        VersionRange { min, max }
    }

    /// Create a range with no upper bound
    pub fn at_least(min: Version) -> Self {
        VersionRange { min, max: None }
    }

    /// Lower bound (inclusive)
    pub fn min(&self) -> &Version {
        &self.min
    }

    /// Upper bound (inclusive), if any
    pub fn max(&self) -> Option<&Version> {
        self.max.as_ref()
    }

    /// Check if the range has no upper bound
    pub fn is_open_ended(&self) -> bool {
        self.max.is_none()
    }

    /// Check if the lower bound sits above the upper bound
    pub fn is_inverted(&self) -> bool {
        self.max
            .as_ref()
            .is_some_and(|max| self.min.numeric_cmp(max).is_gt())
    }

    /// Check if a version falls inside the range. Both ends are inclusive
    /// and suffixes are ignored.
    pub fn contains(&self, version: &Version) -> bool {
        if version.numeric_cmp(&self.min).is_lt() {
            return false;
        }

        match &self.max {
            Some(max) => version.numeric_cmp(max).is_le(),
            None => true,
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, *)", self.min),
        }
    }
}
