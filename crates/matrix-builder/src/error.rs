use matrix_version::VersionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    // Version errors
    #[error(transparent)]
    Version(#[from] VersionError),

    // Rule table errors
    #[error("Failed to parse rule tables: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Stable and next markers must differ, both are {version}")]
    MarkersNotDistinct { version: String },

    #[error("Version {version} in the {table} table has {found} components, expected {expected}")]
    InconsistentDepth {
        table: String,
        version: String,
        expected: usize,
        found: usize,
    },

    #[error("Rule #{index} in the {table} table lists no operating systems")]
    EmptyRuleOsSet { table: String, index: usize },

    #[error("Rule in the {table} table has minimum {min} above maximum {max}")]
    InvertedRange {
        table: String,
        min: String,
        max: String,
    },

    // Assembly errors
    #[error("No {table} version is compatible with {os}")]
    MissingAuxiliary { table: String, os: String },

    // Output errors
    #[error("Failed to serialize matrix as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to serialize matrix as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
