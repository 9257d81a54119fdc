//! Single-writer state of the product list page.
//!
//! [`CatalogStore`] keeps the filter state, its URL query string and the
//! displayed page of products together. Every mutation returns a
//! [`FetchTicket`] that the caller executes against the catalog; the
//! response comes back as a [`FetchOutcome`] and is only applied when it
//! belongs to the most recently issued ticket.

use serde::Serialize;

use crate::domain::filter::{FilterChange, FilterError, FilterState};
use crate::domain::price::PriceBounds;
use crate::domain::product::{DEFAULT_PAGE_SIZE, FilterOptions, PaginationMeta, Product, ProductPage};
use crate::dto::api::ProductListRequest;
use crate::services::ServiceResult;

#[cfg(feature = "server")]
pub mod debounce;
#[cfg(feature = "server")]
pub mod session;
pub mod sidebar;

/// Message shown when a product fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch products";

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient user-visible message.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// A catalog request issued by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    pub seq: u64,
    pub request: ProductListRequest,
}

/// The result of executing a [`FetchTicket`].
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: ServiceResult<ProductPage>,
}

#[derive(Debug)]
pub struct CatalogStore {
    filters: FilterState,
    query: String,
    bounds: PriceBounds,
    options: FilterOptions,
    page_size: usize,
    products: Vec<Product>,
    pagination: PaginationMeta,
    loading: bool,
    last_issued: u64,
    notifications: Vec<Notification>,
}

impl CatalogStore {
    /// Creates the store from the page URL and issues the first fetch.
    pub fn mount(query: &str) -> (Self, FetchTicket) {
        Self::mount_with(query, DEFAULT_PAGE_SIZE)
    }

    pub fn mount_with(query: &str, page_size: usize) -> (Self, FetchTicket) {
        let filters = FilterState::from_url(query);
        let page_size = page_size.max(1);
        let mut store = Self {
            query: filters.to_url(),
            filters,
            bounds: PriceBounds::default(),
            options: FilterOptions::default(),
            page_size,
            products: Vec::new(),
            pagination: PaginationMeta {
                limit: page_size,
                ..PaginationMeta::default()
            },
            loading: false,
            last_issued: 0,
            notifications: Vec::new(),
        };
        let ticket = store.issue(1);
        (store, ticket)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Query string mirroring the current filters, without `?`.
    pub fn url_query(&self) -> &str {
        &self.query
    }

    pub fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: PriceBounds) {
        self.bounds = bounds;
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FilterOptions) {
        self.options = options;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn pagination(&self) -> PaginationMeta {
        self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Writes one filter field; changing a filter restarts at page 1.
    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<FetchTicket, FilterError> {
        let next = self.filters.set_filter(key, value, self.bounds)?;
        Ok(self.commit(next))
    }

    pub fn apply_change(&mut self, change: &FilterChange) -> Result<FetchTicket, FilterError> {
        let next = self.filters.apply(change, self.bounds)?;
        Ok(self.commit(next))
    }

    /// Commits both price ends with a single fetch.
    pub fn set_price_range(&mut self, gte: f64, lte: f64) -> FetchTicket {
        let next = self.filters.set_price_range(gte, lte, self.bounds);
        self.commit(next)
    }

    /// Resets every filter and empties the URL query.
    pub fn clear_all(&mut self) -> FetchTicket {
        self.commit(FilterState::cleared())
    }

    /// Fetches `page` of the current filters. Filters and URL are unchanged.
    pub fn request_page(&mut self, page: usize) -> FetchTicket {
        self.issue(page.max(1))
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        self.pagination
            .has_next()
            .then(|| self.issue(self.pagination.current_page + 1))
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        self.pagination
            .has_previous()
            .then(|| self.issue(self.pagination.current_page - 1))
    }

    /// Applies a fetch result if it answers the latest ticket. Returns
    /// whether the outcome was applied.
    pub fn apply_response(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq != self.last_issued {
            log::debug!(
                "Discarding stale product response #{} (latest #{})",
                outcome.seq,
                self.last_issued
            );
            return false;
        }

        self.loading = false;
        match outcome.result {
            Ok(page) => {
                self.products = page.products;
                self.pagination = page.pagination;
                if let Some(bounds) = page.price_bounds {
                    self.bounds = bounds;
                }
            }
            Err(err) => {
                log::error!("Failed to fetch products: {err}");
                self.products.clear();
                self.notifications.push(Notification::error(FETCH_ERROR_MESSAGE));
            }
        }
        true
    }

    fn commit(&mut self, next: FilterState) -> FetchTicket {
        self.filters = next;
        self.query = self.filters.to_url();
        self.issue(1)
    }

    fn issue(&mut self, page: usize) -> FetchTicket {
        self.last_issued += 1;
        self.loading = true;
        FetchTicket {
            seq: self.last_issued,
            request: ProductListRequest::from_filters(&self.filters, page, self.page_size),
        }
    }
}
