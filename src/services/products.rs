//! Services loading product pages for the current filters.

use crate::domain::filter::{FilterKey, FilterState};
use crate::domain::price::PriceBounds;
use crate::domain::product::ProductPage;
use crate::dto::api::ProductListRequest;
use crate::dto::products::{ActiveFilterLink, ProductsPageData};
use crate::forms::filters::{ChangeFilterForm, FilterQueryForm};
use crate::pagination::page_window;
use crate::repository::CatalogReader;
use crate::services::ServiceResult;
use crate::store::{CatalogStore, FetchOutcome, FetchTicket};

/// Issues a single list request against the catalog.
pub async fn fetch_page<R>(repo: &R, request: &ProductListRequest) -> ServiceResult<ProductPage>
where
    R: CatalogReader,
{
    let page = repo.list_products(request).await?;
    Ok(page)
}

/// Executes a ticket issued by [`CatalogStore`].
pub async fn execute<R>(repo: &R, ticket: &FetchTicket) -> FetchOutcome
where
    R: CatalogReader,
{
    FetchOutcome {
        seq: ticket.seq,
        result: fetch_page(repo, &ticket.request).await,
    }
}

/// Loads the product list for a page URL query.
///
/// Catalog failures do not fail the page: the data comes back with no
/// products and an error notification.
pub async fn load_products_page<R>(repo: &R, query: &str, page_size: usize) -> ProductsPageData
where
    R: CatalogReader,
{
    let page = FilterQueryForm::parse(query)
        .map(|form| form.page())
        .unwrap_or(1);

    let (mut store, first) = CatalogStore::mount_with(query, page_size);
    let ticket = if page > 1 {
        store.request_page(page)
    } else {
        first
    };

    let outcome = execute(repo, &ticket).await;
    store.apply_response(outcome);

    page_data(&mut store)
}

fn page_data(store: &mut CatalogStore) -> ProductsPageData {
    let filters = store.filters().clone();
    let bounds = store.bounds();
    let pagination = store.pagination();
    let active_filters = filters
        .active_filters()
        .into_iter()
        .map(|chip| ActiveFilterLink::new(&filters, chip, bounds))
        .collect();

    ProductsPageData {
        query: store.url_query().to_string(),
        active_filter_count: filters.active_filter_count(),
        active_filters,
        products: store.products().to_vec(),
        pages: page_window(pagination.total_pages, pagination.current_page),
        pagination,
        notifications: store.take_notifications(),
        filters,
    }
}

/// Applies a single `key=value` change to the filters in `query` and returns
/// the resulting canonical query string.
///
/// The catalog's price bounds are unknown here, so a typed price is kept as
/// is apart from being non-negative and ordered against the other end.
pub fn apply_filter_link(query: &str) -> ServiceResult<String> {
    let form = ChangeFilterForm::parse(query)?;
    let key: FilterKey = form.key.parse()?;
    let next = FilterState::from_url(query).set(key, &form.value, PriceBounds::UNBOUNDED)?;
    Ok(next.to_url())
}
