//! Product enrichment: attach company info to every product before display.
//!
//! ```text
//! products ──► link per product ──► unique uncached links
//!                                          │
//!                              bounded fan-out (max_concurrency)
//!                                          │
//!                                          ▼
//!                      cache.insert_if_absent ──► EnrichedProduct[]
//! ```
//!
//! The cache is passed in by the caller and only mutated here, after all
//! lookups for the pass have completed.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};

use super::cache::MetadataCache;
use super::links::LinkRotation;
use super::metadata::MetadataSource;
use super::models::{CompanyInfo, EnrichedProduct, Product};

/// Links in first-seen order, deduplicated, excluding those already cached.
pub fn pending_links(links: &[String], cache: &MetadataCache) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut pending = Vec::new();
    for link in links {
        if !cache.contains(link) && seen.insert(link.as_str()) {
            pending.push(link.clone());
        }
    }
    pending
}

/// Enrich `products` in order.
///
/// At most `max_concurrency` lookups are in flight at once (values below 1 are
/// treated as 1, which makes the pass sequential). A link already present in
/// `cache` is never looked up again, and existing entries are never replaced.
pub async fn enrich(
    products: Vec<Product>,
    rotation: &LinkRotation,
    source: &dyn MetadataSource,
    cache: &mut MetadataCache,
    max_concurrency: usize,
) -> Vec<EnrichedProduct> {
    let links: Vec<String> = products
        .iter()
        .enumerate()
        .map(|(index, product)| rotation.link_for(index, product))
        .collect();

    let pending = pending_links(&links, cache);
    if !pending.is_empty() {
        tracing::debug!(
            products = products.len(),
            lookups = pending.len(),
            cached = cache.len(),
            "enriching products"
        );

        let fetched: Vec<(String, CompanyInfo)> = stream::iter(pending)
            .map(|link| async move {
                let info = source.company_info(&link).await;
                (link, info)
            })
            .buffer_unordered(max_concurrency.max(1))
            .collect()
            .await;

        for (link, info) in fetched {
            cache.insert_if_absent(link, info);
        }
    }

    products
        .into_iter()
        .zip(links)
        .map(|(product, link)| {
            let info = cache.get(&link).cloned().unwrap_or_default();
            EnrichedProduct {
                product,
                link,
                info,
            }
        })
        .collect()
}
