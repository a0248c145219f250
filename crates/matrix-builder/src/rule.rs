//! Compatibility rules and per-dependency rule tables.

use matrix_version::{Version, VersionRange};

/// "Versions in this range are supported on these operating systems."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityRule {
    range: VersionRange,
    oses: Vec<String>,
}

impl CompatibilityRule {
    pub fn new(range: VersionRange, oses: Vec<String>) -> Self {
        Self { range, oses }
    }

    pub fn range(&self) -> &VersionRange {
        &self.range
    }

    pub fn oses(&self) -> &[String] {
        &self.oses
    }

    /// Open-ended rules track the current release line.
    pub fn is_open_ended(&self) -> bool {
        self.range.is_open_ended()
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.range.contains(version)
    }
}

/// Known versions and compatibility rules for one dependency.
#[derive(Debug, Clone)]
pub struct DependencyTable {
    name: String,
    versions: Vec<Version>,
    rules: Vec<CompatibilityRule>,
}

impl DependencyTable {
    pub fn new(name: impl Into<String>, versions: Vec<Version>, rules: Vec<CompatibilityRule>) -> Self {
        Self {
            name: name.into(),
            versions,
            rules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn rules(&self) -> &[CompatibilityRule] {
        &self.rules
    }

    /// Check if `version` is one of the known versions (exact text match).
    pub fn knows(&self, version: &Version) -> bool {
        self.versions.iter().any(|v| v == version)
    }

    /// Key used for this dependency's column in the output document.
    pub fn column_key(&self) -> String {
        format!("{}_version", self.name)
    }

    /// Walk every (rule, version) pair where the version falls in the rule's
    /// range, in rule order then known-version order.
    pub fn matching_pairs(&self) -> impl Iterator<Item = (&CompatibilityRule, &Version)> {
        self.rules.iter().flat_map(move |rule| {
            self.versions
                .iter()
                .filter(move |v| rule.matches(v))
                .map(move |v| (rule, v))
        })
    }
}
