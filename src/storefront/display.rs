//! Display records built from enriched products and raw link previews.

use serde::Serialize;
use serde_json::Value;

use super::models::EnrichedProduct;

/// Image shown when a product has no picture.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Publisher label on a preview card when the upstream has none.
pub const DEFAULT_PUBLISHER: &str = "상품";

/// `10000` → `"₩10,000"`.
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₩{}", grouped)
}

/// One row of the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub id: i64,
    pub name: String,
    pub price: u64,
    pub price_label: String,
    pub image_url: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    pub og_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    pub company: String,
}

impl From<&EnrichedProduct> for ListingEntry {
    fn from(enriched: &EnrichedProduct) -> Self {
        let product = &enriched.product;
        let info = &enriched.info;
        let image_url = if product.image_url.is_empty() {
            PLACEHOLDER_IMAGE.to_string()
        } else {
            product.image_url.clone()
        };
        let og_title = if info.title.is_empty() {
            product.name.clone()
        } else {
            info.title.clone()
        };
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            price_label: format_price(product.price),
            image_url,
            link: enriched.link.clone(),
            og_image: non_empty(&info.logo),
            og_title,
            og_description: non_empty(&info.description),
            company: info.company.clone(),
        }
    }
}

/// Compact preview of a seller link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewCard {
    pub title: String,
    pub publisher: String,
    pub logo: String,
}

impl PreviewCard {
    /// Build a card from a raw unfurl response. `None` when the response has no
    /// `data` section, in which case nothing should be shown.
    pub fn from_preview(raw: &Value, product_name: &str) -> Option<Self> {
        let data = raw.get("data").filter(|d| d.is_object())?;
        let text = |key: &str| {
            data.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        let logo = data
            .get("logo")
            .and_then(|logo| logo.get("url"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(Self {
            title: text("title").unwrap_or_else(|| product_name.to_string()),
            publisher: text("publisher").unwrap_or_else(|| DEFAULT_PUBLISHER.to_string()),
            logo,
        })
    }

    /// Card used when the preview could not be fetched at all.
    pub fn fallback(product_name: &str) -> Self {
        Self {
            title: product_name.to_string(),
            publisher: DEFAULT_PUBLISHER.to_string(),
            logo: String::new(),
        }
    }

    /// Single character shown in place of a missing logo.
    pub fn initial(&self) -> Option<char> {
        self.publisher.chars().next()
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
