//! DTO modules that bridge the catalog API, services and the HTTP surface.

pub mod api;
pub mod products;
