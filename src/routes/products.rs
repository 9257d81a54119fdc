use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::models::config::ServerConfig;
use crate::repository::HttpCatalogRepository;
use crate::routes::redirect;
use crate::services::ServiceError;
use crate::services::filter_options as filter_options_service;
use crate::services::products as products_service;

#[get("/products")]
pub async fn list_products(
    req: HttpRequest,
    repo: web::Data<HttpCatalogRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let data = products_service::load_products_page(
        repo.get_ref(),
        req.query_string(),
        server_config.default_page_size,
    )
    .await;

    HttpResponse::Ok().json(data)
}

#[get("/filters/options")]
pub async fn filter_options(repo: web::Data<HttpCatalogRepository>) -> impl Responder {
    let options = filter_options_service::load_filter_options(repo.get_ref()).await;
    HttpResponse::Ok().json(options)
}

#[get("/filters/sidebar")]
pub async fn filter_sidebar(
    req: HttpRequest,
    repo: web::Data<HttpCatalogRepository>,
) -> impl Responder {
    let model = filter_options_service::load_sidebar(repo.get_ref(), req.query_string()).await;
    HttpResponse::Ok().json(model)
}

/// Plain-link filter change: `?key=..&value=..` plus the current filters.
#[get("/filters/apply")]
pub async fn apply_filter(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    let query = products_service::apply_filter_link(req.query_string())?;
    if query.is_empty() {
        Ok(redirect("/products"))
    } else {
        Ok(redirect(&format!("/products?{query}")))
    }
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
