//! Website classification used to fill in metadata for bare URLs.
//!
//! Provides a [`Classifier`] trait with two implementations:
//! - [`CohereClassifier`] - Cohere chat API
//! - [`NullClassifier`] - No-op implementation when no API key is configured

mod cohere_classifier;
mod null_classifier;
mod service;

pub use cohere_classifier::{
    CohereClassifier, DEFAULT_API_URL, DEFAULT_MODEL, build_prompt, extract_json_object,
    parse_classification,
};
pub use null_classifier::NullClassifier;
pub use service::{Classifier, ClassifierError, ClassifierResult};

#[cfg(test)]
pub use service::MockClassifier;
