use std::time::Duration;

use storefront_catalog::domain::product::{Category, Color, PaginationMeta, Product, ProductPage};
use storefront_catalog::dto::api::ProductListRequest;
use storefront_catalog::repository::CatalogReader;
use storefront_catalog::repository::errors::RepositoryResult;
use storefront_catalog::services::products::execute;
use storefront_catalog::store::CatalogStore;
use storefront_catalog::store::sidebar::{FilterSidebar, SidebarEvent};

/// Catalog whose first page answers slower than the others.
struct SlowFirstPage;

impl CatalogReader for SlowFirstPage {
    async fn list_products(&self, request: &ProductListRequest) -> RepositoryResult<ProductPage> {
        let delay = if request.page == 1 { 300 } else { 50 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(ProductPage {
            products: vec![Product {
                id: format!("page-{}", request.page),
                name: "Chino".to_string(),
                ..Product::default()
            }],
            pagination: PaginationMeta {
                current_page: request.page,
                total_pages: 2,
                total_products: 30,
                limit: request.limit,
            },
            price_bounds: None,
        })
    }

    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(vec![])
    }

    async fn list_colors(&self) -> RepositoryResult<Vec<Color>> {
        Ok(vec![])
    }
}

#[tokio::test(start_paused = true)]
async fn late_response_for_older_request_is_discarded() {
    let repo = SlowFirstPage;
    let (mut store, _) = CatalogStore::mount("");

    let a = store.request_page(1);
    let b = store.request_page(2);

    let (outcome_a, outcome_b) = tokio::join!(execute(&repo, &a), execute(&repo, &b));

    // B resolves first, A arrives afterwards.
    assert!(store.apply_response(outcome_b));
    assert!(!store.apply_response(outcome_a));

    assert_eq!(store.pagination().current_page, 2);
    assert_eq!(store.products()[0].id, "page-2");
    assert!(!store.is_loading());
}

#[test]
fn sidebar_changes_flow_through_store() {
    let (mut store, _) = CatalogStore::mount("category=Shirts");
    let mut sidebar = FilterSidebar::new(store.filters(), store.bounds());

    let change = sidebar
        .handle(
            SidebarEvent::ToggleCategory("Shirts".to_string()),
            store.filters(),
            store.bounds(),
        )
        .unwrap();
    let ticket = store.apply_change(&change).unwrap();
    assert_eq!(store.url_query(), "");
    assert_eq!(ticket.request.category, None);
    assert_eq!(ticket.request.page, 1);

    sidebar.handle(
        SidebarEvent::EditMinPrice("250".to_string()),
        store.filters(),
        store.bounds(),
    );
    sidebar.handle(
        SidebarEvent::EditMaxPrice("abc".to_string()),
        store.filters(),
        store.bounds(),
    );
    let change = sidebar
        .handle(SidebarEvent::ApplyPrice, store.filters(), store.bounds())
        .unwrap();
    let ticket = store.apply_change(&change).unwrap();
    assert_eq!(store.url_query(), "priceGte=250&priceLte=10000");
    assert_eq!(ticket.request.price_gte.map(|p| p.get()), Some(250.0));
    assert!(sidebar.observe(store.filters(), store.bounds()));
    assert_eq!(sidebar.draft().high(), 10_000.0);
}

#[test]
fn clear_all_twice_equals_once() {
    let (mut store, _) = CatalogStore::mount("gender=all&color=Red&priceLte=90&search=belt");
    assert_eq!(store.filters().active_filter_count(), 3);

    let first = store.clear_all();
    let after_first = (store.filters().clone(), store.url_query().to_string());
    let second = store.clear_all();

    assert_eq!((store.filters().clone(), store.url_query().to_string()), after_first);
    assert_eq!(first.request, second.request);
    assert_eq!(second.seq, first.seq + 1);
}
