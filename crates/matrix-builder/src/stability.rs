//! Stability labels and the release markers that drive them.

use std::fmt;

use matrix_version::Version;

use crate::error::{MatrixError, Result};

/// Classification of a primary-library version relative to the maintained
/// release line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StabilityLabel {
    Stable,
    Next,
    Oldstable,
}

impl StabilityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityLabel::Stable => "stable",
            StabilityLabel::Next => "next",
            StabilityLabel::Oldstable => "oldstable",
        }
    }
}

impl fmt::Display for StabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The designated stable and next primary-library versions.
///
/// The two markers are guaranteed to differ, so a version can never be
/// both.
#[derive(Debug, Clone)]
pub struct ReleaseMarkers {
    stable: Version,
    next: Version,
}

impl ReleaseMarkers {
    pub fn new(stable: Version, next: Version) -> Result<Self> {
        if stable == next {
            return Err(MatrixError::MarkersNotDistinct {
                version: stable.to_string(),
            });
        }
        Ok(Self { stable, next })
    }

    pub fn stable(&self) -> &Version {
        &self.stable
    }

    pub fn next(&self) -> &Version {
        &self.next
    }

    pub fn is_next(&self, version: &Version) -> bool {
        *version == self.next
    }

    /// Label `version` for an OS. `next` is only handed out on OSes that
    /// track the current release line; elsewhere the next marker falls
    /// through to `oldstable`.
    pub fn classify(&self, version: &Version, on_modern_os: bool) -> StabilityLabel {
        if self.is_next(version) && on_modern_os {
            StabilityLabel::Next
        } else if *version == self.stable {
            StabilityLabel::Stable
        } else {
            StabilityLabel::Oldstable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn markers() -> ReleaseMarkers {
        ReleaseMarkers::new(v("2.0.10"), v("2.0.11")).unwrap()
    }

    #[test]
    fn test_markers_must_differ() {
        let err = ReleaseMarkers::new(v("2.0.10"), v("2.0.10")).unwrap_err();
        assert!(matches!(err, MatrixError::MarkersNotDistinct { ref version } if version == "2.0.10"));
    }

    #[test]
    fn test_classify_next_on_modern_os() {
        assert_eq!(markers().classify(&v("2.0.11"), true), StabilityLabel::Next);
    }

    #[test]
    fn test_classify_next_on_legacy_os() {
        assert_eq!(markers().classify(&v("2.0.11"), false), StabilityLabel::Oldstable);
    }

    #[test]
    fn test_classify_stable() {
        assert_eq!(markers().classify(&v("2.0.10"), false), StabilityLabel::Stable);
        assert_eq!(markers().classify(&v("2.0.10"), true), StabilityLabel::Stable);
    }

    #[test]
    fn test_classify_oldstable() {
        assert_eq!(markers().classify(&v("2.0.5"), true), StabilityLabel::Oldstable);
        assert_eq!(markers().classify(&v("2.0.9"), false), StabilityLabel::Oldstable);
    }

    #[test]
    fn test_label_strings() {
        assert_eq!(StabilityLabel::Stable.to_string(), "stable");
        assert_eq!(StabilityLabel::Next.to_string(), "next");
        assert_eq!(StabilityLabel::Oldstable.to_string(), "oldstable");
    }
}
