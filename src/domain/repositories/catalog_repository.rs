//! Repository trait for catalog storage.

use crate::domain::entities::LinkEntry;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for the link catalog.
///
/// The catalog is always read and written as a whole: there are no partial
/// writes and no locking, so the last writer wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonFileCatalogRepository`] - JSON file
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_json.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Loads the full catalog in insertion order.
    ///
    /// A missing or empty backing store yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store exists but cannot be read.
    async fn load(&self) -> Result<Vec<LinkEntry>, AppError>;

    /// Replaces the stored catalog with `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the catalog cannot be written.
    async fn save(&self, entries: &[LinkEntry]) -> Result<(), AppError>;
}
