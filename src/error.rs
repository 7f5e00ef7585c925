//! Error types for world creation and configuration
//!
//! Runtime physics never fails; everything that can go wrong happens before a
//! game starts (reading the catalog, reading settings, laying out planets).

use std::path::PathBuf;

/// Failure to read or validate the celestial catalog
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("catalog entry {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("catalog entry {index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },
}

/// Rejection sampling ran out of attempts for a celestial
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("layout infeasible: no free spot for celestial {index} ({name}) after {attempts} attempts")]
    Infeasible {
        index: usize,
        name: String,
        attempts: u32,
    },
}

/// Failure to read or validate [`crate::Settings`]
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level error for starting a game
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
