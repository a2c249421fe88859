//! Classifier trait and error types.

use crate::domain::entities::Classification;
use async_trait::async_trait;
use std::fmt;

/// Errors that can occur while classifying a website.
#[derive(Debug)]
pub enum ClassifierError {
    /// No classifier is configured.
    Disabled,
    /// The request could not be sent or the connection failed.
    RequestError(String),
    /// The service answered with a non-success status.
    StatusError { status: u16, body: String },
    /// The reply did not contain a usable JSON object.
    ResponseError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "Classifier disabled (COHERE_API_KEY not set)"),
            Self::RequestError(e) => write!(f, "Classifier request error: {}", e),
            Self::StatusError { status, body } => {
                write!(f, "Classifier returned HTTP {}: {}", status, body)
            }
            Self::ResponseError(e) => write!(f, "Classifier response error: {}", e),
        }
    }
}

impl std::error::Error for ClassifierError {}

/// Result type for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Trait for inferring descriptive metadata from a URL.
///
/// Callers treat every error as "no metadata available" and fall back to
/// defaults, so implementations should not retry.
///
/// # Implementations
///
/// - [`crate::infrastructure::classifier::CohereClassifier`] - Cohere chat API
/// - [`crate::infrastructure::classifier::NullClassifier`] - Always disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classifies the website at `url` (already normalized).
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifierError`] when the classifier is disabled, the
    /// call fails, or the reply cannot be parsed into a [`Classification`].
    async fn classify(&self, url: &str) -> ClassifierResult<Classification>;
}
