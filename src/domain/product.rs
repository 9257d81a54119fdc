use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::price::PriceBounds;

/// Page size used by the storefront product grid.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hex_code: String,
}

/// Pagination metadata reported by the catalog. Missing fields take the
/// defaults of an empty first page.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_products: usize,
    pub limit: usize,
}

impl Default for PaginationMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_products: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationMeta {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One page of catalog results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: PaginationMeta,
    /// Price interval of the whole filtered catalog, when reported.
    pub price_bounds: Option<PriceBounds>,
}

/// Selectable category and color lists for the filter sidebar.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct FilterOptions {
    pub categories: Vec<Category>,
    pub colors: Vec<Color>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_fills_missing_fields() {
        let meta: PaginationMeta = serde_json::from_str(r#"{"totalPages": 4}"#).unwrap();
        assert_eq!(
            meta,
            PaginationMeta {
                current_page: 1,
                total_pages: 4,
                total_products: 0,
                limit: 20,
            }
        );
        assert!(meta.has_next());
        assert!(!meta.has_previous());
    }

    #[test]
    fn product_reads_backend_shape() {
        let product: Product = serde_json::from_str(
            r#"{"_id":"p1","name":"Linen Shirt","price":1299,"isOnSale":true,"salePrice":999,
                "createdAt":"2025-01-02T03:04:05Z","extra":"ignored"}"#,
        )
        .unwrap();
        assert_eq!(product.id, "p1");
        assert!(product.is_on_sale);
        assert_eq!(product.sale_price, Some(999.0));
        assert!(product.created_at.is_some());
    }

    #[test]
    fn unnamed_product_does_not_sink_the_page() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"_id":"p1","name":"Linen Shirt","price":1299},{"_id":"p2","price":10}]"#,
        )
        .unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].id, "p2");
        assert_eq!(products[1].name, "");
        assert_eq!(products[1].price, 10.0);
    }
}
