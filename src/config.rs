//! Unified configuration for Amatta.
//!
//! Settings are read from `amatta.toml` and layered as file → environment → CLI.
//! Every section is optional; a missing file yields the defaults below.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//! dev = false
//!
//! [catalog]
//! products_url = "https://e153e320-4faa-4d1b-acbb-3196e5a4ecd6.mock.pstmn.io/products"
//!
//! [metadata]
//! endpoint = "https://api.microlink.io"
//! timeout_secs = 10
//! max_concurrency = 4
//!
//! [links]
//! candidates = ["https://brand.naver.com/...", "https://www.musinsa.com/..."]
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE_NAME: &str = "amatta.toml";

pub const DEFAULT_PRODUCTS_URL: &str =
    "https://e153e320-4faa-4d1b-acbb-3196e5a4ecd6.mock.pstmn.io/products";
pub const DEFAULT_METADATA_ENDPOINT: &str = "https://api.microlink.io";

/// Seller pages the link rotation cycles through.
pub const DEFAULT_LINK_CANDIDATES: &[&str] = &[
    "https://brand.naver.com/atez/products/12410254221?NaPm=ct%3Dmkdf1llc%7Cci%3D26ac4a334957f5d4ea7eb5ca22ae315f3e2f82a1%7Ctr%3Dslslsp%7Csn%3D12125186%7Chk%3D060849b8d067cd7e9023fd63fbd96cd28d2fad18&nl-au=3c06864a95844a4db31bb084ca377fda&nl-query=%EB%B0%94%EC%A7%80",
    "https://www.musinsa.com/products/2307747?srsltid=AfmBOoqKAzPzX8JoR8YSJ-ocqwsEIlM8m57BWizWgqv2wjDqBwBkpXYo-zo",
];

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Permissive CORS and bind on all interfaces
    pub dev: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            dev: false,
        }
    }
}

/// Product source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub products_url: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            products_url: DEFAULT_PRODUCTS_URL.to_string(),
        }
    }
}

/// Link unfurling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSection {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Upper bound on in-flight lookups during enrichment (1 = sequential)
    pub max_concurrency: usize,
}

impl Default for MetadataSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_METADATA_ENDPOINT.to_string(),
            timeout_secs: 10,
            max_concurrency: 4,
        }
    }
}

impl MetadataSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksSection {
    pub candidates: Vec<String>,
}

impl Default for LinksSection {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_LINK_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Root of `amatta.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmattaConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub metadata: MetadataSection,
    #[serde(default)]
    pub links: LinksSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl AmattaConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Full layered load: file, then environment overrides, then validation.
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_or_default(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `AMATTA_*` overrides. `lookup` is injected so tests need not touch
    /// the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("AMATTA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("AMATTA_PORT") {
            self.server.port = parse_env("AMATTA_PORT", &port)?;
        }
        if let Some(url) = lookup("AMATTA_PRODUCTS_URL") {
            self.catalog.products_url = url;
        }
        if let Some(endpoint) = lookup("AMATTA_METADATA_ENDPOINT") {
            self.metadata.endpoint = endpoint;
        }
        if let Some(limit) = lookup("AMATTA_MAX_CONCURRENCY") {
            self.metadata.max_concurrency = parse_env("AMATTA_MAX_CONCURRENCY", &limit)?;
        }
        if let Some(json) = lookup("AMATTA_LOG_JSON") {
            self.logging.json = json != "false" && json != "0";
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.links.candidates.is_empty() {
            return Err(invalid("links.candidates", "at least one link is required"));
        }
        if self.metadata.max_concurrency == 0 {
            return Err(invalid("metadata.max_concurrency", "must be at least 1"));
        }
        if self.metadata.timeout_secs == 0 {
            return Err(invalid("metadata.timeout_secs", "must be at least 1"));
        }
        if self.catalog.products_url.trim().is_empty() {
            return Err(invalid("catalog.products_url", "must not be empty"));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        message: format!("cannot parse '{}'", value),
    })
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message: message.to_string(),
    }
}
