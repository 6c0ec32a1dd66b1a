//! Typed error hierarchy for the Amatta storefront.
//!
//! Three top-level enums cover the three collaborators the crate talks to:
//! - `MetadataError`: link unfurling (microlink or the local proxy)
//! - `CatalogError`: the external product source
//! - `ConfigError`: `amatta.toml` loading and validation

use thiserror::Error;

/// Errors from a single metadata lookup.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Metadata request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Metadata response was not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Metadata service rejected the lookup (status {status})")]
    Rejected { status: u16 },
}

/// Errors from the external product source.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product source request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Product source returned status {status}")]
    Status { status: u16 },

    #[error("Product source response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Invalid product: {0}")]
    Invalid(String),
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}
