//! No-op classifier used when no API key is configured.

use super::service::{Classifier, ClassifierError, ClassifierResult};
use crate::domain::entities::Classification;
use async_trait::async_trait;
use tracing::debug;

/// A classifier that never produces metadata.
///
/// Entries added through it always get the default name, description and
/// type.
pub struct NullClassifier;

impl NullClassifier {
    /// Creates a new NullClassifier instance.
    pub fn new() -> Self {
        debug!("Using NullClassifier (AI classification disabled)");
        Self
    }
}

impl Default for NullClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Classifier for NullClassifier {
    async fn classify(&self, _url: &str) -> ClassifierResult<Classification> {
        Err(ClassifierError::Disabled)
    }
}
