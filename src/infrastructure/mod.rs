//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for catalog storage and website classification.
//!
//! # Modules
//!
//! - [`classifier`] - Classifier abstraction (Cohere and no-op implementations)
//! - [`persistence`] - JSON file repository implementation

pub mod classifier;
pub mod persistence;
