use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// Company name shown when a lookup yields no publisher.
pub const DEFAULT_COMPANY: &str = "판매자";

/// A product as returned by the product source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Price in KRW
    pub price: u64,
    pub seller: String,
    #[serde(default)]
    pub image_url: String,
    /// Seller page, when the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Envelope of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: u64,
    pub seller: String,
    #[serde(default)]
    pub image_url: String,
}

impl NewProduct {
    /// Required fields must be non-blank; surrounding whitespace is dropped.
    pub fn validate(self) -> Result<Self, CatalogError> {
        let name = self.name.trim().to_string();
        let seller = self.seller.trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::Invalid("name is required".into()));
        }
        if seller.is_empty() {
            return Err(CatalogError::Invalid("seller is required".into()));
        }
        Ok(Self {
            name,
            price: self.price,
            seller,
            image_url: self.image_url.trim().to_string(),
        })
    }
}

/// Raw unfurl result. Missing upstream fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMetadata {
    pub company: String,
    pub logo: String,
    pub title: String,
    pub description: String,
}

/// Publisher details attached to a product for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub company: String,
    pub logo: String,
    pub title: String,
    pub description: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            company: DEFAULT_COMPANY.to_string(),
            logo: String::new(),
            title: String::new(),
            description: String::new(),
        }
    }
}

impl From<LinkMetadata> for CompanyInfo {
    fn from(meta: LinkMetadata) -> Self {
        let company = if meta.company.is_empty() {
            DEFAULT_COMPANY.to_string()
        } else {
            meta.company
        };
        Self {
            company,
            logo: meta.logo,
            title: meta.title,
            description: meta.description,
        }
    }
}

/// A product with its resolved link and company info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedProduct {
    pub product: Product,
    pub link: String,
    pub info: CompanyInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_camel_case() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"name":"바지","price":10000,"seller":"나이키","imageUrl":"x"}"#,
        )
        .unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "바지");
        assert_eq!(product.price, 10000);
        assert_eq!(product.image_url, "x");
        assert_eq!(product.link, None);
    }

    #[test]
    fn test_product_missing_image_url_is_empty() {
        let product: Product =
            serde_json::from_str(r#"{"id":2,"name":"셔츠","price":0,"seller":"s"}"#).unwrap();
        assert_eq!(product.image_url, "");
    }

    #[test]
    fn test_product_negative_price_rejected() {
        let result = serde_json::from_str::<Product>(
            r#"{"id":3,"name":"n","price":-1,"seller":"s","imageUrl":""}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_product_list_missing_products_is_empty() {
        let list: ProductList = serde_json::from_str("{}").unwrap();
        assert!(list.products.is_empty());
    }

    #[test]
    fn test_new_product_serializes_camel_case() {
        let new = NewProduct {
            name: "바지".into(),
            price: 10000,
            seller: "나이키".into(),
            image_url: "x".into(),
        };
        let json = serde_json::to_value(&new).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name":"바지","price":10000,"seller":"나이키","imageUrl":"x"})
        );
    }

    #[test]
    fn test_new_product_validate_trims() {
        let new = NewProduct {
            name: "  바지 ".into(),
            price: 5,
            seller: " 나이키".into(),
            image_url: " ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(new.name, "바지");
        assert_eq!(new.seller, "나이키");
        assert_eq!(new.image_url, "");
    }

    #[test]
    fn test_new_product_validate_requires_name_and_seller() {
        let blank_name = NewProduct {
            name: " ".into(),
            price: 1,
            seller: "s".into(),
            image_url: String::new(),
        };
        assert!(matches!(
            blank_name.validate(),
            Err(CatalogError::Invalid(msg)) if msg.contains("name")
        ));

        let blank_seller = NewProduct {
            name: "n".into(),
            price: 1,
            seller: String::new(),
            image_url: String::new(),
        };
        assert!(matches!(
            blank_seller.validate(),
            Err(CatalogError::Invalid(msg)) if msg.contains("seller")
        ));
    }

    #[test]
    fn test_company_info_default() {
        let info = CompanyInfo::default();
        assert_eq!(info.company, "판매자");
        assert_eq!(info.logo, "");
        assert_eq!(info.title, "");
        assert_eq!(info.description, "");
    }

    #[test]
    fn test_company_info_from_metadata_falls_back_on_empty_company() {
        let info = CompanyInfo::from(LinkMetadata {
            company: String::new(),
            logo: "logo.png".into(),
            title: "바지".into(),
            description: String::new(),
        });
        assert_eq!(info.company, "판매자");
        assert_eq!(info.logo, "logo.png");
        assert_eq!(info.title, "바지");
    }
}
