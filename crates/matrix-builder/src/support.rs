//! Per-OS support resolution.
//!
//! Both resolvers walk every rule against every known version and collect,
//! for each operating system, the versions that fall inside a matching
//! range. OS keys keep the order in which they were first populated.

use indexmap::{IndexMap, IndexSet};
use matrix_version::Version;

use crate::rule::DependencyTable;

/// Mapping from OS to the versions usable on it, ascending and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportTable {
    entries: IndexMap<String, Vec<Version>>,
}

impl SupportTable {
    fn push(&mut self, os: &str, version: &Version) {
        self.entries
            .entry(os.to_string())
            .or_default()
            .push(version.clone());
    }

    fn finish(mut self) -> Self {
        for versions in self.entries.values_mut() {
            versions.sort();
            versions.dedup();
        }
        self
    }

    /// OS names in first-seen order
    pub fn os_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn versions(&self, os: &str) -> Option<&[Version]> {
        self.entries.get(os).map(Vec::as_slice)
    }

    /// Numerically highest version supported on `os`
    pub fn highest(&self, os: &str) -> Option<&Version> {
        self.entries.get(os).and_then(|versions| versions.last())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Version])> {
        self.entries
            .iter()
            .map(|(os, versions)| (os.as_str(), versions.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Auxiliary-dependency support: the best regular version per OS plus the
/// OSes allowed to pick up the release candidate.
#[derive(Debug, Clone)]
pub struct AuxiliarySupport {
    table: SupportTable,
    release_candidate: Option<Version>,
    rc_eligible: IndexSet<String>,
}

impl AuxiliarySupport {
    /// Highest compatible version on `os`, release candidate excluded
    pub fn highest(&self, os: &str) -> Option<&Version> {
        self.table.highest(os)
    }

    pub fn table(&self) -> &SupportTable {
        &self.table
    }

    pub fn release_candidate(&self) -> Option<&Version> {
        self.release_candidate.as_ref()
    }

    pub fn is_rc_eligible(&self, os: &str) -> bool {
        self.rc_eligible.contains(os)
    }

    pub fn rc_eligible(&self) -> impl Iterator<Item = &str> {
        self.rc_eligible.iter().map(String::as_str)
    }
}

/// Primary-library support: every usable version per OS plus the set of
/// OSes covered by an open-ended rule.
#[derive(Debug, Clone)]
pub struct PrimarySupport {
    table: SupportTable,
    modern: IndexSet<String>,
}

impl PrimarySupport {
    pub fn table(&self) -> &SupportTable {
        &self.table
    }

    pub fn is_modern(&self, os: &str) -> bool {
        self.modern.contains(os)
    }

    pub fn modern(&self) -> impl Iterator<Item = &str> {
        self.modern.iter().map(String::as_str)
    }
}

/// Resolve the auxiliary dependency. The release candidate, when it falls
/// inside a rule, is kept out of the regular per-OS lists and only marks
/// the rule's OSes as eligible for it.
pub fn resolve_auxiliary(table: &DependencyTable, release_candidate: Option<&Version>) -> AuxiliarySupport {
    let mut support = SupportTable::default();
    let mut rc_eligible = IndexSet::new();

    for (rule, version) in table.matching_pairs() {
        if release_candidate == Some(version) {
            rc_eligible.extend(rule.oses().iter().cloned());
            continue;
        }
        for os in rule.oses() {
            support.push(os, version);
        }
    }

    let support = support.finish();
    for (os, versions) in support.iter() {
        if let Some(highest) = versions.last() {
            log::debug!("{} on {}: {} ({} compatible)", table.name(), os, highest, versions.len());
        }
    }
    if let Some(rc) = release_candidate {
        log::debug!("{} {} eligible on {} OS(es)", table.name(), rc, rc_eligible.len());
    }

    AuxiliarySupport {
        table: support,
        release_candidate: release_candidate.cloned(),
        rc_eligible,
    }
}

/// Resolve the primary library.
pub fn resolve_primary(table: &DependencyTable) -> PrimarySupport {
    let mut support = SupportTable::default();
    let mut modern = IndexSet::new();

    // An open-ended rule marks its OSes modern even when no known version
    // reaches its minimum yet.
    for rule in table.rules().iter().filter(|rule| rule.is_open_ended()) {
        modern.extend(rule.oses().iter().cloned());
    }

    for (rule, version) in table.matching_pairs() {
        for os in rule.oses() {
            support.push(os, version);
        }
    }

    let support = support.finish();
    log::debug!(
        "{} supported on {} OS(es), {} modern",
        table.name(),
        support.len(),
        modern.len()
    );

    PrimarySupport {
        table: support,
        modern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::CompatibilityRule;
    use matrix_version::VersionRange;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn rule(min: &str, max: Option<&str>, oses: &[&str]) -> CompatibilityRule {
        CompatibilityRule::new(
            VersionRange::new(v(min), max.map(v)),
            oses.iter().map(|os| os.to_string()).collect(),
        )
    }

    fn boost() -> DependencyTable {
        let versions = [
            "1.69.0", "1.70.0", "1.75.0", "1.80.0", "1.82.0", "1.87.0", "1.88.0_rc1",
        ];
        DependencyTable::new(
            "boost",
            versions.iter().map(|s| v(s)).collect(),
            vec![
                rule("1.69.0", Some("1.75.0"), &["ubuntu-20.04", "debian-10"]),
                rule("1.75.0", Some("1.82.0"), &["ubuntu-22.04", "debian-11"]),
                rule("1.82.0", None, &["ubuntu-24.04", "debian-12"]),
            ],
        )
    }

    fn libtorrent() -> DependencyTable {
        let versions = ["2.0.5", "2.0.6", "2.0.9", "2.0.10", "2.0.11"];
        DependencyTable::new(
            "libtorrent",
            versions.iter().map(|s| v(s)).collect(),
            vec![
                rule("2.0.1", Some("2.0.4"), &["ubuntu-20.04", "debian-10"]),
                rule("2.0.3", Some("2.0.10"), &["ubuntu-22.04", "debian-11"]),
                rule("2.0.11", None, &["ubuntu-24.04", "debian-12"]),
            ],
        )
    }

    #[test]
    fn test_auxiliary_highest_per_os() {
        let rc = v("1.88.0_rc1");
        let support = resolve_auxiliary(&boost(), Some(&rc));

        assert_eq!(support.highest("ubuntu-20.04"), Some(&v("1.75.0")));
        assert_eq!(support.highest("debian-11"), Some(&v("1.82.0")));
        assert_eq!(support.highest("ubuntu-24.04"), Some(&v("1.87.0")));
        assert_eq!(support.highest("fedora-40"), None);
    }

    #[test]
    fn test_auxiliary_rc_kept_separate() {
        let rc = v("1.88.0_rc1");
        let support = resolve_auxiliary(&boost(), Some(&rc));

        assert!(support.is_rc_eligible("ubuntu-24.04"));
        assert!(support.is_rc_eligible("debian-12"));
        assert!(!support.is_rc_eligible("ubuntu-22.04"));
        assert_eq!(support.release_candidate(), Some(&rc));

        for (_, versions) in support.table().iter() {
            assert!(!versions.contains(&rc));
        }
    }

    #[test]
    fn test_auxiliary_without_rc() {
        let support = resolve_auxiliary(&boost(), None);
        // With no designated candidate the tagged build competes normally.
        assert_eq!(support.highest("debian-12"), Some(&v("1.88.0_rc1")));
        assert_eq!(support.rc_eligible().count(), 0);
    }

    #[test]
    fn test_inclusive_upper_bound() {
        let support = resolve_auxiliary(&boost(), None);
        let versions = support.table().versions("ubuntu-20.04").unwrap();
        assert!(versions.contains(&v("1.75.0")));
        assert!(!versions.contains(&v("1.80.0")));
    }

    #[test]
    fn test_overlapping_rules_union_and_dedup() {
        let table = DependencyTable::new(
            "boost",
            vec![v("1.70.0"), v("1.75.0"), v("1.80.0"), v("1.82.0")],
            vec![
                rule("1.69.0", Some("1.75.0"), &["debian-11"]),
                rule("1.75.0", Some("1.80.0"), &["debian-11", "ubuntu-22.04"]),
            ],
        );
        let support = resolve_auxiliary(&table, None);

        let versions = support.table().versions("debian-11").unwrap();
        assert_eq!(versions, &[v("1.70.0"), v("1.75.0"), v("1.80.0")]);

        let versions = support.table().versions("ubuntu-22.04").unwrap();
        assert_eq!(versions, &[v("1.75.0"), v("1.80.0")]);
    }

    #[test]
    fn test_primary_versions_sorted() {
        let support = resolve_primary(&libtorrent());
        let versions = support.table().versions("ubuntu-22.04").unwrap();
        assert_eq!(
            versions,
            &[v("2.0.5"), v("2.0.6"), v("2.0.9"), v("2.0.10")]
        );
        assert_eq!(support.table().versions("debian-12").unwrap(), &[v("2.0.11")]);
    }

    #[test]
    fn test_primary_rule_without_known_versions_yields_no_entry() {
        let support = resolve_primary(&libtorrent());
        assert_eq!(support.table().versions("ubuntu-20.04"), None);
        assert_eq!(support.table().len(), 4);
    }

    #[test]
    fn test_primary_first_seen_order() {
        let support = resolve_primary(&libtorrent());
        let oses: Vec<&str> = support.table().os_names().collect();
        assert_eq!(oses, vec!["ubuntu-22.04", "debian-11", "ubuntu-24.04", "debian-12"]);
    }

    #[test]
    fn test_primary_modern_set() {
        let support = resolve_primary(&libtorrent());
        assert!(support.is_modern("ubuntu-24.04"));
        assert!(support.is_modern("debian-12"));
        assert!(!support.is_modern("ubuntu-22.04"));
    }

    #[test]
    fn test_open_ended_rule_is_modern_without_versions() {
        let table = DependencyTable::new(
            "libtorrent",
            vec![v("2.0.5")],
            vec![rule("3.0.0", None, &["arch"])],
        );
        let support = resolve_primary(&table);
        assert!(support.is_modern("arch"));
        assert!(support.table().is_empty());
    }
}
