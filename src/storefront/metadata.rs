//! Link unfurling clients.
//!
//! [`MicrolinkClient`] talks to the third-party unfurling API directly;
//! [`ProxyMetadataClient`] goes through a running Amatta server's
//! `POST /api/link-metadata`. Both implement [`MetadataSource`], whose contract
//! is best-effort: any failure degrades to [`CompanyInfo::default`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::MetadataError;

use super::models::{CompanyInfo, LinkMetadata};

const USER_AGENT: &str = concat!("amatta/", env!("CARGO_PKG_VERSION"));

/// Resolves a seller link to company info for display.
///
/// Implementations never fail; errors are logged and replaced by the default
/// record so enrichment cannot block product rendering.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn company_info(&self, url: &str) -> CompanyInfo;
}

/// Client for a microlink-compatible endpoint (`GET {endpoint}?url=...`).
#[derive(Debug, Clone)]
pub struct MicrolinkClient {
    http: reqwest::Client,
    endpoint: String,
}

impl MicrolinkClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, MetadataError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(MetadataError::Transport)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Raw upstream body, whatever its status.
    pub async fn preview(&self, url: &str) -> Result<Value, MetadataError> {
        let (_, body) = self.fetch(url).await?;
        Ok(body)
    }

    /// Typed lookup. A non-success status or a body without a `data` object is
    /// reported as [`MetadataError::Rejected`].
    pub async fn lookup(&self, url: &str) -> Result<LinkMetadata, MetadataError> {
        let (status, body) = self.fetch(url).await?;
        if !status.is_success() {
            return Err(MetadataError::Rejected {
                status: status.as_u16(),
            });
        }
        parse_link_metadata(&body).ok_or(MetadataError::Rejected {
            status: status.as_u16(),
        })
    }

    async fn fetch(&self, url: &str) -> Result<(reqwest::StatusCode, Value), MetadataError> {
        tracing::debug!(url, endpoint = %self.endpoint, "unfurling link");
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("url", url)])
            .send()
            .await
            .map_err(MetadataError::Transport)?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(MetadataError::Transport)?;
        let body = serde_json::from_slice(&bytes).map_err(MetadataError::Decode)?;
        Ok((status, body))
    }
}

#[async_trait]
impl MetadataSource for MicrolinkClient {
    async fn company_info(&self, url: &str) -> CompanyInfo {
        match self.lookup(url).await {
            Ok(meta) => meta.into(),
            Err(e) => {
                tracing::warn!(url, error = %e, "metadata lookup failed, using defaults");
                CompanyInfo::default()
            }
        }
    }
}

/// Client for a running Amatta server's metadata proxy.
#[derive(Debug, Clone)]
pub struct ProxyMetadataClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyMetadataClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MetadataError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(MetadataError::Transport)?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn lookup(&self, url: &str) -> Result<LinkMetadata, MetadataError> {
        let resp = self
            .http
            .post(format!("{}/api/link-metadata", self.base_url))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .map_err(MetadataError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MetadataError::Rejected {
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await.map_err(MetadataError::Transport)?;
        let body: Value = serde_json::from_slice(&bytes).map_err(MetadataError::Decode)?;
        Ok(LinkMetadata {
            company: str_field(&body, "company"),
            logo: str_field(&body, "logo"),
            title: str_field(&body, "title"),
            description: str_field(&body, "description"),
        })
    }
}

#[async_trait]
impl MetadataSource for ProxyMetadataClient {
    async fn company_info(&self, url: &str) -> CompanyInfo {
        match self.lookup(url).await {
            Ok(meta) => meta.into(),
            Err(e) => {
                tracing::warn!(url, error = %e, "proxy metadata lookup failed, using defaults");
                CompanyInfo::default()
            }
        }
    }
}

/// Map a microlink body (`{data: {title, description, publisher, image: {url}}}`)
/// to [`LinkMetadata`]. `None` when `data` is absent or not an object.
pub fn parse_link_metadata(body: &Value) -> Option<LinkMetadata> {
    let data = body.get("data").filter(|d| d.is_object())?;
    let logo = data
        .get("image")
        .and_then(|image| image.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(LinkMetadata {
        company: str_field(data, "publisher"),
        logo,
        title: str_field(data, "title"),
        description: str_field(data, "description"),
    })
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
