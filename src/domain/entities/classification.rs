//! Structured metadata returned by the website classifier.

use serde::{Deserialize, Serialize};

/// Metrics as reported by the classifier. Only the rating is used.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationMetrics {
    pub rating: f64,
}

/// Metadata inferred for a URL.
///
/// Missing keys take empty/false defaults. Keys outside this shape (such as
/// the echoed `link`) are ignored; a key with the wrong JSON type fails
/// deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub subtypes: Vec<String>,
    pub tags: Vec<String>,
    pub roles: Vec<String>,
    pub language: String,
    pub cost: String,
    pub requires_account: bool,
    pub data_types: Vec<String>,
    pub api_available: bool,
    pub metrics: ClassificationMetrics,
}
