#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::HttpCatalogRepository;
#[cfg(feature = "server")]
use crate::routes::products::{apply_filter, filter_options, filter_sidebar, health, list_products};

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;
pub mod store;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = HttpCatalogRepository::new(&server_config.api_base_url, server_config.request_timeout())
        .map_err(|e| std::io::Error::other(format!("Failed to build catalog client: {e}")))?;

    log::info!(
        "Serving catalog from {} (page size {})",
        repo.base_url(),
        server_config.default_page_size
    );

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}

/// Registers the catalog routes.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_products)
        .service(filter_options)
        .service(filter_sidebar)
        .service(apply_filter)
        .service(health);
}
