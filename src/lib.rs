//! # OSINT Link Catalog
//!
//! A personal catalog of OSINT resources kept in a flat JSON file, with
//! optional AI classification of bare URLs.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Catalog entries and the repository trait
//! - **Application Layer** ([`application`]) - Catalog operations
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON file storage and classifiers
//! - **CLI** ([`cli`]) - Command surface and console rendering
//!
//! ## Features
//!
//! - One entry per domain, whatever scheme or path was typed
//! - Search across names, links, descriptions, types, tags and roles
//! - Grouped view by type and subtype
//! - Cohere-backed metadata for links added without a name, description or type
//! - Tolerant loading of hand-edited catalog files
//!
//! ## Quick Start
//!
//! ```bash
//! export COHERE_API_KEY="your_key_here"  # Optional
//!
//! olc add -l shodan.io
//! olc ls
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AddedEntry, CatalogService, ClassificationOutcome, TypeGroup,
    };
    pub use crate::domain::entities::{Classification, LinkEntry, LinkFields};
    pub use crate::domain::repositories::CatalogRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::classifier::{Classifier, ClassifierError, NullClassifier};
    pub use crate::infrastructure::persistence::JsonFileCatalogRepository;
}
