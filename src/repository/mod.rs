use crate::domain::product::{Category, Color, ProductPage};
use crate::dto::api::ProductListRequest;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "server")]
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

#[cfg(feature = "server")]
pub use http::HttpCatalogRepository;

/// Read access to the product catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogReader {
    async fn list_products(&self, request: &ProductListRequest) -> RepositoryResult<ProductPage>;
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    async fn list_colors(&self) -> RepositoryResult<Vec<Color>>;
}
