//! Domain layer containing the catalog model and storage contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Catalog operations live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
