//! Domain types behind the product-list filters.

pub mod filter;
pub mod price;
pub mod product;
pub mod types;
