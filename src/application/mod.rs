//! Application layer services implementing the catalog operations.
//!
//! Services consume the repository and classifier traits and provide a clean
//! API for the command dispatcher.
//!
//! # Available Services
//!
//! - [`services::catalog_service::CatalogService`] - Add, edit, remove, search and grouping

pub mod services;
