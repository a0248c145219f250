//! Matrix construction and output.

use indexmap::IndexMap;
use serde::Serialize;

use crate::assembler::{assemble, MatrixRow, OsOrder};
use crate::config::MatrixConfig;
use crate::error::Result;
use crate::support::{resolve_auxiliary, resolve_primary};

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Serialized shape: `{ include: [ { <primary>_version, os, <auxiliary>_version, stability }, ... ] }`
#[derive(Debug, Clone, Serialize)]
pub struct MatrixDocument {
    pub include: Vec<IndexMap<String, String>>,
}

/// A fully assembled build matrix
#[derive(Debug, Clone)]
pub struct Matrix {
    primary_key: String,
    auxiliary_key: String,
    rows: Vec<MatrixRow>,
}

impl Matrix {
    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as insertion-ordered mappings, keys in column order
    pub fn to_document(&self) -> MatrixDocument {
        let include = self
            .rows
            .iter()
            .map(|row| {
                let mut entry = IndexMap::with_capacity(4);
                entry.insert(self.primary_key.clone(), row.primary_version.to_string());
                entry.insert("os".to_string(), row.os.clone());
                entry.insert(self.auxiliary_key.clone(), row.auxiliary_version.to_string());
                entry.insert("stability".to_string(), row.stability.to_string());
                entry
            })
            .collect();

        MatrixDocument { include }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_document())?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Yaml => self.to_yaml(),
            OutputFormat::Json => self.to_json(),
        }
    }
}

/// Builds a [`Matrix`] from rule tables
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    config: MatrixConfig,
    os_order: OsOrder,
}

impl MatrixBuilder {
    pub fn new(config: MatrixConfig) -> Self {
        Self {
            config,
            os_order: OsOrder::default(),
        }
    }

    /// Builder over the tables compiled into the binary
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(MatrixConfig::embedded()?))
    }

    pub fn with_os_order(mut self, order: OsOrder) -> Self {
        self.os_order = order;
        self
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    /// Validate the tables, resolve auxiliary then primary support, and
    /// merge them into rows. Nothing is emitted unless every step
    /// succeeds.
    pub fn build(&self) -> Result<Matrix> {
        let tables = self.config.compile()?;

        let auxiliary = resolve_auxiliary(&tables.auxiliary, tables.release_candidate.as_ref());
        let primary = resolve_primary(&tables.primary);
        let rows = assemble(
            &primary,
            &auxiliary,
            tables.auxiliary.name(),
            &tables.markers,
            self.os_order,
        )?;

        log::info!(
            "Built {} matrix rows across {} OS(es), ordered {}",
            rows.len(),
            primary.table().len(),
            self.os_order
        );

        Ok(Matrix {
            primary_key: tables.primary.column_key(),
            auxiliary_key: tables.auxiliary.column_key(),
            rows,
        })
    }
}
