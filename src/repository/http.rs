//! HTTP client for the remote catalog API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::product::{Category, Color, ProductPage};
use crate::dto::api::{Envelope, ProductListData, ProductListRequest};
use crate::repository::CatalogReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Catalog repository backed by `{base_url}/products`, `/categories` and
/// `/colors`. Cloning shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpCatalogRepository {
    client: Client,
    base_url: String,
}

impl HttpCatalogRepository {
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(query) if !query.is_empty() => format!("{}/{path}?{query}", self.base_url),
            _ => format!("{}/{path}", self.base_url),
        }
    }

    async fn get_data<T>(&self, path: &str, query: Option<&str>) -> RepositoryResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.url(path, query);
        log::debug!("GET {url}");

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                RepositoryError::NotFound
            } else {
                RepositoryError::Status {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let body = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.into_data())
    }
}

impl CatalogReader for HttpCatalogRepository {
    async fn list_products(&self, request: &ProductListRequest) -> RepositoryResult<ProductPage> {
        let query = serde_html_form::to_string(request)
            .map_err(|err| RepositoryError::Unexpected(format!("Failed to encode query: {err}")))?;
        let data: ProductListData = self.get_data("products", Some(&query)).await?;
        Ok(data.into())
    }

    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.get_data("categories", None).await
    }

    async fn list_colors(&self) -> RepositoryResult<Vec<Color>> {
        self.get_data("colors", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_path_and_query() {
        let repo = HttpCatalogRepository::with_client(Client::new(), "http://api.local/v1/");
        assert_eq!(repo.base_url(), "http://api.local/v1");
        assert_eq!(repo.url("colors", None), "http://api.local/v1/colors");
        assert_eq!(repo.url("products", Some("")), "http://api.local/v1/products");
        assert_eq!(
            repo.url("products", Some("gender=men&page=1&limit=20")),
            "http://api.local/v1/products?gender=men&page=1&limit=20"
        );
    }

    #[tokio::test]
    async fn unreachable_catalog_is_a_connection_error() {
        let repo =
            HttpCatalogRepository::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = repo.list_colors().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection(_)), "got {err:?}");
    }
}
