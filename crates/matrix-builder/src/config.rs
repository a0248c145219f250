//! Rule table configuration.
//!
//! The tables ship inside the binary (`res/matrix.toml`) and are parsed at
//! startup. [`MatrixConfig::compile`] turns the raw strings into parsed,
//! validated [`DependencyTable`]s.

use serde::Deserialize;

use matrix_version::{Version, VersionRange};

use crate::error::{MatrixError, Result};
use crate::rule::{CompatibilityRule, DependencyTable};
use crate::stability::ReleaseMarkers;

const EMBEDDED_TABLES: &str = include_str!("../res/matrix.toml");

/// Root of the rule table file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixConfig {
    /// Library whose versions drive the matrix rows
    pub primary: PrimaryConfig,

    /// Dependency paired with each row
    pub auxiliary: AuxiliaryConfig,
}

/// A single `{ min, max, os }` rule entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub min: String,

    /// Absent means open-ended
    #[serde(default)]
    pub max: Option<String>,

    pub os: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimaryConfig {
    pub name: String,
    pub versions: Vec<String>,
    pub stable: String,
    pub next: String,
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuxiliaryConfig {
    pub name: String,
    pub versions: Vec<String>,

    #[serde(default)]
    pub release_candidate: Option<String>,

    pub rules: Vec<RuleConfig>,
}

/// Parsed and validated tables, ready for resolution
#[derive(Debug, Clone)]
pub struct CompiledTables {
    pub primary: DependencyTable,
    pub auxiliary: DependencyTable,
    pub markers: ReleaseMarkers,
    pub release_candidate: Option<Version>,
}

impl MatrixConfig {
    /// Load the tables compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_TABLES)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check the tables without keeping the compiled form
    pub fn validate(&self) -> Result<()> {
        self.compile().map(|_| ())
    }

    /// Parse every version string and enforce the table invariants:
    /// one segment depth per table, distinct stable/next markers, a
    /// non-empty OS list and `min <= max` for every rule.
    pub fn compile(&self) -> Result<CompiledTables> {
        let mut depth = DepthCheck::new(&self.primary.name);
        let primary = compile_table(&self.primary.name, &self.primary.versions, &self.primary.rules, &mut depth)?;
        let stable = depth.parse(&self.primary.stable)?;
        let next = depth.parse(&self.primary.next)?;
        let markers = ReleaseMarkers::new(stable, next)?;

        let mut depth = DepthCheck::new(&self.auxiliary.name);
        let auxiliary = compile_table(&self.auxiliary.name, &self.auxiliary.versions, &self.auxiliary.rules, &mut depth)?;
        let release_candidate = self
            .auxiliary
            .release_candidate
            .as_deref()
            .map(|rc| depth.parse(rc))
            .transpose()?;

        for (label, marker) in [("stable", markers.stable()), ("next", markers.next())] {
            if !primary.knows(marker) {
                log::warn!("{} marker {} is not a known {} version", label, marker, primary.name());
            }
        }
        if let Some(rc) = &release_candidate {
            if !auxiliary.knows(rc) {
                log::warn!("Release candidate {} is not a known {} version", rc, auxiliary.name());
            }
        }

        log::debug!(
            "Compiled {} ({} versions, {} rules) and {} ({} versions, {} rules)",
            primary.name(),
            primary.versions().len(),
            primary.rules().len(),
            auxiliary.name(),
            auxiliary.versions().len(),
            auxiliary.rules().len()
        );

        Ok(CompiledTables {
            primary,
            auxiliary,
            markers,
            release_candidate,
        })
    }
}

fn compile_table(
    name: &str,
    versions: &[String],
    rules: &[RuleConfig],
    depth: &mut DepthCheck<'_>,
) -> Result<DependencyTable> {
    let versions = versions
        .iter()
        .map(|v| depth.parse(v))
        .collect::<Result<Vec<_>>>()?;

    let mut compiled = Vec::with_capacity(rules.len());
    for (index, rule) in rules.iter().enumerate() {
        if rule.os.is_empty() {
            return Err(MatrixError::EmptyRuleOsSet {
                table: name.to_string(),
                index,
            });
        }

        let min = depth.parse(&rule.min)?;
        let max = rule.max.as_deref().map(|max| depth.parse(max)).transpose()?;
        let range = VersionRange::new(min, max);
        if range.is_inverted() {
            return Err(MatrixError::InvertedRange {
                table: name.to_string(),
                min: rule.min.clone(),
                max: rule.max.clone().unwrap_or_default(),
            });
        }

        log::trace!("{} rule #{}: {} on {:?}", name, index, range, rule.os);
        compiled.push(CompatibilityRule::new(range, rule.os.clone()));
    }

    Ok(DependencyTable::new(name, versions, compiled))
}

/// Comparison does not pad tuples, so every version in a table must have
/// the depth of the first one parsed.
struct DepthCheck<'a> {
    table: &'a str,
    expected: Option<usize>,
}

impl<'a> DepthCheck<'a> {
    fn new(table: &'a str) -> Self {
        Self {
            table,
            expected: None,
        }
    }

    fn parse(&mut self, raw: &str) -> Result<Version> {
        let version = Version::parse(raw)?;
        match self.expected {
            None => self.expected = Some(version.depth()),
            Some(expected) if expected != version.depth() => {
                return Err(MatrixError::InconsistentDepth {
                    table: self.table.to_string(),
                    version: raw.to_string(),
                    expected,
                    found: version.depth(),
                });
            }
            Some(_) => {}
        }
        Ok(version)
    }
}
