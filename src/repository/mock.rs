//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::product::{Category, Color, ProductPage};
use crate::dto::api::ProductListRequest;
use crate::repository::CatalogReader;
use crate::repository::errors::RepositoryResult;

mock! {
    pub Repository {}

    impl CatalogReader for Repository {
        async fn list_products(&self, request: &ProductListRequest) -> RepositoryResult<ProductPage>;
        async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
        async fn list_colors(&self) -> RepositoryResult<Vec<Color>>;
    }
}
