//! Version comparison utilities

use std::cmp::Ordering;

use crate::version::{Version, VersionError};

/// Comparator for comparing version strings
pub struct Comparator;

impl Comparator {
    /// Check if version1 > version2
    pub fn greater_than(version1: &str, version2: &str) -> Result<bool, VersionError> {
        Ok(Self::compare(version1, version2)? == Ordering::Greater)
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(version1: &str, version2: &str) -> Result<bool, VersionError> {
        Ok(Self::compare(version1, version2)? != Ordering::Less)
    }

    /// Check if version1 < version2
    pub fn less_than(version1: &str, version2: &str) -> Result<bool, VersionError> {
        Ok(Self::compare(version1, version2)? == Ordering::Less)
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(version1: &str, version2: &str) -> Result<bool, VersionError> {
        Ok(Self::compare(version1, version2)? != Ordering::Greater)
    }

    /// Check if version1 and version2 have the same numeric components
    pub fn equal_to(version1: &str, version2: &str) -> Result<bool, VersionError> {
        Ok(Self::compare(version1, version2)? == Ordering::Equal)
    }

    /// Compare the numeric components of two version strings
    pub fn compare(version1: &str, version2: &str) -> Result<Ordering, VersionError> {
        let a = Version::parse(version1)?;
        let b = Version::parse(version2)?;
        Ok(a.numeric_cmp(&b))
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Result<Vec<String>, VersionError> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Result<Vec<String>, VersionError> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Result<Vec<String>, VersionError> {
        let mut parsed = versions
            .iter()
            .map(|v| Version::parse(v))
            .collect::<Result<Vec<_>, _>>()?;

        parsed.sort();
        if !ascending {
            parsed.reverse();
        }

        Ok(parsed.into_iter().map(|v| v.as_str().to_string()).collect())
    }
}
