//! Wire types of the remote catalog API.

use serde::{Deserialize, Serialize};

use crate::domain::filter::{FilterState, Gender, SortOrder};
use crate::domain::price::PriceBounds;
use crate::domain::product::{PaginationMeta, Product, ProductPage};
use crate::domain::types::Price;

/// `{ "data": ... }` wrapper used by every catalog endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T: Default> Envelope<T> {
    /// Unwraps the payload, treating a missing `data` field as empty.
    pub fn into_data(self) -> T {
        self.data.unwrap_or_default()
    }
}

/// Payload of `GET products`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListData {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
    #[serde(default)]
    pub price_range: Option<PriceBounds>,
}

impl From<ProductListData> for ProductPage {
    fn from(data: ProductListData) -> Self {
        Self {
            products: data.products,
            pagination: data.pagination.unwrap_or_default(),
            price_bounds: data
                .price_range
                .map(|bounds| PriceBounds::new(bounds.min, bounds.max)),
        }
    }
}

/// Query parameters of `GET products`. Fields holding their "no filter"
/// value are left out of the request.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductListRequest {
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_on_sale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_gte: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_lte: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl ProductListRequest {
    /// Builds the request for `page` of the filtered catalog.
    ///
    /// The storefront only carries the men's catalog, so a stored gender of
    /// `all` is sent as `men`.
    pub fn from_filters(filters: &FilterState, page: usize, limit: usize) -> Self {
        let search = filters.search.trim();
        Self {
            gender: Gender::Men,
            category: filters.category.token().map(|t| t.to_string()),
            color: filters.color.token().map(|t| t.to_string()),
            is_on_sale: filters.is_on_sale.as_flag(),
            price_gte: filters.price.gte(),
            price_lte: filters.price.lte(),
            sort: (filters.sort != SortOrder::default()).then_some(filters.sort),
            search: (!search.is_empty()).then(|| search.to_string()),
            page: page.max(1),
            limit,
        }
    }
}
