//! DTOs shaped for the product list endpoints.

use serde::Serialize;

use crate::domain::filter::{ActiveFilter, FilterState};
use crate::domain::price::PriceBounds;
use crate::domain::product::{PaginationMeta, Product};
use crate::store::Notification;

/// An active filter chip with the query string that removes it.
#[derive(Debug, Serialize, PartialEq)]
pub struct ActiveFilterLink {
    pub label: String,
    pub href: String,
}

impl ActiveFilterLink {
    pub fn new(filters: &FilterState, chip: ActiveFilter, bounds: PriceBounds) -> Self {
        let href = filters
            .apply(&chip.remove, bounds)
            .map(|next| next.to_url())
            .unwrap_or_default();
        Self {
            label: chip.label,
            href,
        }
    }
}

/// Data required to render one page of the product list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsPageData {
    /// Canonical query string of `filters`.
    pub query: String,
    pub filters: FilterState,
    pub products: Vec<Product>,
    pub pagination: PaginationMeta,
    /// Page links with `None` marking a gap.
    pub pages: Vec<Option<usize>>,
    pub active_filters: Vec<ActiveFilterLink>,
    pub active_filter_count: usize,
    pub notifications: Vec<Notification>,
}
