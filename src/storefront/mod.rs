//! Storefront: product listing with seller-link enrichment.
//!
//! ## Module Map
//!
//! ```text
//! ┌──────────┐  HTTP  ┌──────────────────────────────────────────────────┐
//! │  Client  │ ─────> │  server.rs  (axum Router, ServerConfig)          │
//! │  / CLI   │ <───── │    └─ api.rs  (route handlers, AppState)         │
//! └──────────┘        │         │                                        │
//!                     │         │ Storefront::refresh()                  │
//!                     │         v                                        │
//!                     │  catalog.rs   ProductSource → Vec<Product>       │
//!                     │  enrich.rs    links + cache + bounded fan-out    │
//!                     │  metadata.rs  MetadataSource → CompanyInfo       │
//!                     │  display.rs   ListingEntry / PreviewCard         │
//!                     └──────────────────────────────────────────────────┘
//! ```
//!
//! | Module     | Responsibility                                             |
//! |------------|------------------------------------------------------------|
//! | `models`   | `Product`, `NewProduct`, `CompanyInfo`, `EnrichedProduct`  |
//! | `links`    | `LinkRotation`: index → seller link                        |
//! | `cache`    | `MetadataCache`: write-once link → `CompanyInfo` map       |
//! | `metadata` | microlink + proxy clients behind `MetadataSource`          |
//! | `catalog`  | product source client behind `ProductSource`               |
//! | `enrich`   | the enrichment pass                                        |
//! | `display`  | display records and price formatting                       |

pub mod api;
pub mod cache;
pub mod catalog;
pub mod display;
pub mod enrich;
pub mod links;
pub mod metadata;
pub mod models;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use crate::config::AmattaConfig;
use crate::errors::CatalogError;

use cache::MetadataCache;
use catalog::{HttpCatalog, ProductSource};
use display::ListingEntry;
use links::LinkRotation;
use metadata::{MetadataSource, MicrolinkClient};
use models::{CompanyInfo, EnrichedProduct, NewProduct};

/// One storefront session: collaborators plus the session's metadata cache.
pub struct Storefront {
    catalog: Arc<dyn ProductSource>,
    metadata: Arc<dyn MetadataSource>,
    rotation: LinkRotation,
    max_concurrency: usize,
    cache: Mutex<MetadataCache>,
}

impl Storefront {
    pub fn new(
        catalog: Arc<dyn ProductSource>,
        metadata: Arc<dyn MetadataSource>,
        rotation: LinkRotation,
        max_concurrency: usize,
    ) -> Self {
        Self {
            catalog,
            metadata,
            rotation,
            max_concurrency,
            cache: Mutex::new(MetadataCache::new()),
        }
    }

    /// Storefront backed by the HTTP product source and microlink.
    pub fn from_config(config: &AmattaConfig) -> Result<Self> {
        let metadata = MicrolinkClient::new(&config.metadata.endpoint, config.metadata.timeout())
            .context("Failed to build metadata client")?;
        Self::with_metadata(config, Arc::new(metadata))
    }

    /// Storefront backed by the HTTP product source and the given metadata source.
    pub fn with_metadata(config: &AmattaConfig, metadata: Arc<dyn MetadataSource>) -> Result<Self> {
        let catalog = HttpCatalog::new(&config.catalog.products_url, config.metadata.timeout())
            .context("Failed to build product source client")?;
        let rotation = LinkRotation::new(config.links.candidates.clone())?;
        Ok(Self::new(
            Arc::new(catalog),
            metadata,
            rotation,
            config.metadata.max_concurrency,
        ))
    }

    /// Fetch the product list and enrich it against the session cache.
    pub async fn refresh(&self) -> Result<Vec<EnrichedProduct>, CatalogError> {
        let products = self.catalog.list_products().await?;
        let mut cache = self.cache.lock().await;
        let enriched = enrich::enrich(
            products,
            &self.rotation,
            self.metadata.as_ref(),
            &mut cache,
            self.max_concurrency,
        )
        .await;
        tracing::info!(
            products = enriched.len(),
            cached_links = cache.len(),
            "storefront refreshed"
        );
        Ok(enriched)
    }

    /// Display rows for the current product list. A product source failure is
    /// logged and yields an empty listing.
    pub async fn listing(&self) -> Vec<ListingEntry> {
        match self.refresh().await {
            Ok(enriched) => enriched.iter().map(ListingEntry::from).collect(),
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch products");
                Vec::new()
            }
        }
    }

    /// Validate and submit a new product. Returns the payload as sent.
    pub async fn add_product(&self, product: NewProduct) -> Result<NewProduct, CatalogError> {
        let product = product.validate()?;
        self.catalog.create_product(&product).await?;
        Ok(product)
    }

    /// Company info for a single link, through the session cache.
    pub async fn company_info(&self, link: &str) -> CompanyInfo {
        let mut cache = self.cache.lock().await;
        if let Some(info) = cache.get(link) {
            return info.clone();
        }
        let info = self.metadata.company_info(link).await;
        cache.insert_if_absent(link.to_string(), info.clone());
        info
    }

    pub async fn cached_links(&self) -> Vec<String> {
        self.cache.lock().await.links()
    }

    /// Drop every cached entry, starting a fresh session.
    pub async fn reset_cache(&self) {
        self.cache.lock().await.clear();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::storefront::models::Product;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct MockCatalog {
        products: Vec<Product>,
        fail: bool,
        created: StdMutex<Vec<NewProduct>>,
    }

    #[async_trait]
    impl ProductSource for MockCatalog {
        async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
            if self.fail {
                return Err(CatalogError::Status { status: 503 });
            }
            Ok(self.products.clone())
        }

        async fn create_product(&self, product: &NewProduct) -> Result<(), CatalogError> {
            if self.fail {
                return Err(CatalogError::Status { status: 500 });
            }
            self.created.lock().unwrap().push(product.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingSource {
        calls: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl MetadataSource for CountingSource {
        async fn company_info(&self, url: &str) -> CompanyInfo {
            self.calls.lock().unwrap().push(url.to_string());
            CompanyInfo {
                company: "나이키스토어".into(),
                logo: "logo.png".into(),
                title: "바지".into(),
                description: String::new(),
            }
        }
    }

    fn product(id: i64) -> Product {
        Product {
            id,
            name: "바지".into(),
            price: 10000,
            seller: "나이키".into(),
            image_url: "x".into(),
            link: None,
        }
    }

    fn storefront(catalog: MockCatalog, source: Arc<CountingSource>) -> Storefront {
        Storefront::new(Arc::new(catalog), source, LinkRotation::default(), 2)
    }

    #[tokio::test]
    async fn test_refresh_enriches_with_first_candidate() {
        let source = Arc::new(CountingSource::default());
        let sf = storefront(
            MockCatalog {
                products: vec![product(1)],
                ..MockCatalog::default()
            },
            source.clone(),
        );

        let enriched = sf.refresh().await.unwrap();
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].link, crate::config::DEFAULT_LINK_CANDIDATES[0]);
        assert_eq!(enriched[0].info.company, "나이키스토어");
        assert_eq!(enriched[0].info.description, "");
    }

    #[tokio::test]
    async fn test_refresh_reuses_session_cache() {
        let source = Arc::new(CountingSource::default());
        let sf = storefront(
            MockCatalog {
                products: vec![product(1), product(2), product(3)],
                ..MockCatalog::default()
            },
            source.clone(),
        );

        sf.refresh().await.unwrap();
        sf.refresh().await.unwrap();
        assert_eq!(source.calls.lock().unwrap().len(), 2);
        assert_eq!(sf.cached_links().await.len(), 2);

        sf.reset_cache().await;
        sf.refresh().await.unwrap();
        assert_eq!(source.calls.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_listing_empty_on_catalog_failure() {
        let source = Arc::new(CountingSource::default());
        let sf = storefront(
            MockCatalog {
                fail: true,
                ..MockCatalog::default()
            },
            source.clone(),
        );
        assert!(sf.listing().await.is_empty());
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_maps_entries() {
        let sf = storefront(
            MockCatalog {
                products: vec![product(7)],
                ..MockCatalog::default()
            },
            Arc::new(CountingSource::default()),
        );
        let listing = sf.listing().await;
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, 7);
        assert_eq!(listing[0].price_label, "₩10,000");
        assert_eq!(listing[0].og_image.as_deref(), Some("logo.png"));
    }

    #[tokio::test]
    async fn test_add_product_validates_before_submitting() {
        let catalog = Arc::new(MockCatalog::default());
        let sf = Storefront::new(
            catalog.clone(),
            Arc::new(CountingSource::default()),
            LinkRotation::default(),
            1,
        );

        let err = sf
            .add_product(NewProduct {
                name: "".into(),
                price: 100,
                seller: "s".into(),
                image_url: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));
        assert!(catalog.created.lock().unwrap().is_empty());

        let sent = sf
            .add_product(NewProduct {
                name: " 바지 ".into(),
                price: 100,
                seller: "나이키".into(),
                image_url: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(sent.name, "바지");
        assert_eq!(catalog.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_company_info_cached_per_link() {
        let source = Arc::new(CountingSource::default());
        let sf = storefront(MockCatalog::default(), source.clone());
        let first = sf.company_info("https://a.example").await;
        let second = sf.company_info("https://a.example").await;
        assert_eq!(first, second);
        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }
}
