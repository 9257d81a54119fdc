//! Services loading the selectable filter options.

use crate::domain::filter::FilterState;
use crate::domain::price::PriceBounds;
use crate::domain::product::FilterOptions;
use crate::dto::api::ProductListRequest;
use crate::repository::CatalogReader;
use crate::store::sidebar::{FilterSidebar, SidebarModel};

/// Loads categories and colors. A list that fails to load is logged and
/// replaced by an empty one so the filters stay usable.
pub async fn load_filter_options<R>(repo: &R) -> FilterOptions
where
    R: CatalogReader,
{
    let categories = repo.list_categories().await.unwrap_or_else(|err| {
        log::error!("Failed to load categories: {err}");
        Vec::new()
    });

    let colors = repo.list_colors().await.unwrap_or_else(|err| {
        log::error!("Failed to load colors: {err}");
        Vec::new()
    });

    FilterOptions { categories, colors }
}

/// Builds the sidebar for the filters in a page URL query.
///
/// The slider spans the price bounds the catalog reports for the current
/// filters, widened to cover the committed range.
pub async fn load_sidebar<R>(repo: &R, query: &str) -> SidebarModel
where
    R: CatalogReader,
{
    let filters = FilterState::from_url(query);
    let bounds = load_price_bounds(repo, &filters).await;
    let options = load_filter_options(repo).await;
    FilterSidebar::new(&filters, bounds).model(&filters, &options, bounds)
}

async fn load_price_bounds<R>(repo: &R, filters: &FilterState) -> PriceBounds
where
    R: CatalogReader,
{
    let request = ProductListRequest::from_filters(filters, 1, 1);
    let reported = match repo.list_products(&request).await {
        Ok(page) => page.price_bounds,
        Err(err) => {
            log::error!("Failed to load price bounds: {err}");
            None
        }
    };
    reported.unwrap_or_default().covering(&filters.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{Category, Color, ProductPage};
    use crate::dto::api::ProductListRequest;
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    struct HalfBrokenCatalog;

    impl CatalogReader for HalfBrokenCatalog {
        async fn list_products(&self, _: &ProductListRequest) -> RepositoryResult<ProductPage> {
            Ok(ProductPage::default())
        }

        async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
            Ok(vec![Category {
                id: "c1".to_string(),
                name: "Shirts".to_string(),
                gender: Some("men".to_string()),
            }])
        }

        async fn list_colors(&self) -> RepositoryResult<Vec<Color>> {
            Err(RepositoryError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn failing_list_degrades_to_empty() {
        let options = load_filter_options(&HalfBrokenCatalog).await;
        assert_eq!(options.categories.len(), 1);
        assert!(options.colors.is_empty());
    }

    #[tokio::test]
    async fn sidebar_checks_selected_category() {
        let model = load_sidebar(&HalfBrokenCatalog, "category=Shirts").await;
        assert_eq!(model.active_filter_count, 1);
        assert!(
            model
                .categories
                .iter()
                .any(|option| option.value == "Shirts" && option.checked)
        );
        assert_eq!(model.colors.len(), 1);
    }

    struct PricedCatalog {
        bounds: Option<PriceBounds>,
    }

    impl CatalogReader for PricedCatalog {
        async fn list_products(&self, _: &ProductListRequest) -> RepositoryResult<ProductPage> {
            Ok(ProductPage {
                price_bounds: self.bounds,
                ..ProductPage::default()
            })
        }

        async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
            Ok(vec![])
        }

        async fn list_colors(&self) -> RepositoryResult<Vec<Color>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn sidebar_slider_uses_reported_bounds() {
        let repo = PricedCatalog {
            bounds: Some(PriceBounds::new(500.0, 30_000.0)),
        };
        let model = load_sidebar(&repo, "priceLte=20000").await;
        assert_eq!(model.bounds, PriceBounds::new(500.0, 30_000.0));
        assert_eq!(model.price.low(), 500.0);
        assert_eq!(model.price.high(), 20_000.0);
    }

    #[tokio::test]
    async fn sidebar_slider_covers_committed_price_without_bounds() {
        let repo = PricedCatalog { bounds: None };
        let model = load_sidebar(&repo, "priceLte=20000").await;
        assert_eq!(model.bounds.max, 20_000.0);
        assert_eq!(model.price.high(), 20_000.0);

        let model = load_sidebar(&HalfBrokenCatalog, "").await;
        assert_eq!(model.bounds, PriceBounds::default());
    }
}
