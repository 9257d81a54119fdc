//! Runtime configuration of the catalog service.

pub mod config;
