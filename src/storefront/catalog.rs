use std::time::Duration;

use async_trait::async_trait;

use crate::errors::CatalogError;

use super::models::{NewProduct, Product, ProductList};

/// Abstraction over the external product source for testability.
/// Real implementation: `HttpCatalog`.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    async fn create_product(&self, product: &NewProduct) -> Result<(), CatalogError>;
}

/// REST product source: `GET` and `POST` on a single products URL.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: reqwest::Client,
    products_url: String,
}

impl HttpCatalog {
    pub fn new(products_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::Transport)?;
        Ok(Self {
            http,
            products_url: products_url.into(),
        })
    }
}

#[async_trait]
impl ProductSource for HttpCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let resp = self
            .http
            .get(&self.products_url)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let list: ProductList = resp.json().await.map_err(CatalogError::Decode)?;
        tracing::debug!(count = list.products.len(), "fetched products");
        Ok(list.products)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<(), CatalogError> {
        let resp = self
            .http
            .post(&self.products_url)
            .json(product)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }
        tracing::info!(name = %product.name, price = product.price, "product created");
        Ok(())
    }
}
