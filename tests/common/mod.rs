#![allow(dead_code)]

use async_trait::async_trait;
use osint_link_catalog::application::services::CatalogService;
use osint_link_catalog::domain::entities::{Classification, ClassificationMetrics, LinkEntry};
use osint_link_catalog::infrastructure::classifier::{
    Classifier, ClassifierError, ClassifierResult, NullClassifier,
};
use osint_link_catalog::infrastructure::persistence::JsonFileCatalogRepository;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub const T0: &str = "2024-01-01T00:00:00.000000";

/// Classifier returning a fixed answer and counting calls.
pub struct StubClassifier {
    answer: Option<Classification>,
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn answering(answer: Classification) -> Self {
        Self {
            answer: Some(answer),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for StubClassifier {
    async fn classify(&self, _url: &str) -> ClassifierResult<Classification> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().ok_or_else(|| ClassifierError::StatusError {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

pub fn shodan_classification() -> Classification {
    Classification {
        name: "shodan".to_string(),
        description: "search-engine-for-internet-connected-devices".to_string(),
        entry_type: "search-engine".to_string(),
        subtypes: vec!["iot".to_string()],
        tags: vec!["scanning".to_string(), "devices".to_string()],
        roles: vec!["pentester".to_string()],
        language: "en".to_string(),
        cost: "paid,free".to_string(),
        requires_account: true,
        data_types: vec!["banners".to_string()],
        api_available: true,
        metrics: ClassificationMetrics { rating: 4.6 },
    }
}

pub fn catalog_path(dir: &TempDir) -> PathBuf {
    dir.path().join("links.json")
}

pub fn service_with(
    path: &Path,
    classifier: Arc<dyn Classifier>,
) -> CatalogService<JsonFileCatalogRepository> {
    CatalogService::new(
        Arc::new(JsonFileCatalogRepository::new(path.to_path_buf())),
        classifier,
    )
}

/// Service over `path` with classification disabled.
pub fn offline_service(path: &Path) -> CatalogService<JsonFileCatalogRepository> {
    service_with(path, Arc::new(NullClassifier::new()))
}

pub fn create_test_entry(link: &str, name: &str, entry_type: &str, subtypes: &[&str]) -> LinkEntry {
    LinkEntry {
        link: link.to_string(),
        name: name.to_string(),
        description: format!("About {name}"),
        entry_type: entry_type.to_string(),
        subtypes: subtypes.iter().map(|s| s.to_string()).collect(),
        date_collected: T0.to_string(),
        date_updated: T0.to_string(),
        ..LinkEntry::default()
    }
}
