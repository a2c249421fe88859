//! File-backed repository implementations.
//!
//! Concrete implementations of domain repository traits.
//!
//! # Repositories
//!
//! - [`JsonFileCatalogRepository`] - Whole-catalog storage in one JSON file

pub mod json_catalog_repository;

pub use json_catalog_repository::JsonFileCatalogRepository;
