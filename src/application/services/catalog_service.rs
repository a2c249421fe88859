//! Catalog operations: add, edit, remove, search and grouped listing.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{LinkEntry, LinkFields};
use crate::domain::repositories::CatalogRepository;
use crate::error::AppError;
use crate::infrastructure::classifier::{Classifier, ClassifierError};
use crate::utils::field_parser::now_timestamp;
use crate::utils::url_normalizer::resolve;

/// Bucket name for entries without subtypes in the grouped view.
pub const GENERAL_SUBTYPE: &str = "general";

/// What happened to the classifier step of an `add`.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    /// Descriptive fields were supplied, the classifier was not asked.
    NotRequested,
    /// Classifier metadata was used to fill in the entry.
    Applied,
    /// The classifier failed or is disabled; defaults were used.
    Unavailable(String),
}

/// Result of a successful `add`.
#[derive(Debug, Clone)]
pub struct AddedEntry {
    pub entry: LinkEntry,
    pub classification: ClassificationOutcome,
}

/// Entries sharing one subtype within a type group.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtypeGroup {
    pub subtype: String,
    pub entries: Vec<LinkEntry>,
}

/// Entries sharing one type, split by subtype.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeGroup {
    pub entry_type: String,
    pub subtypes: Vec<SubtypeGroup>,
}

/// Groups entries by type, then by each of their subtypes.
///
/// Entries without subtypes land in [`GENERAL_SUBTYPE`]; an entry with several
/// subtypes appears once under each. Groups keep first-seen order.
pub fn group_entries(entries: &[LinkEntry]) -> Vec<TypeGroup> {
    let mut groups: Vec<TypeGroup> = Vec::new();

    for entry in entries {
        let type_index = match groups
            .iter()
            .position(|g| g.entry_type == entry.entry_type)
        {
            Some(index) => index,
            None => {
                groups.push(TypeGroup {
                    entry_type: entry.entry_type.clone(),
                    subtypes: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[type_index];

        let subtypes: Vec<&str> = if entry.subtypes.is_empty() {
            vec![GENERAL_SUBTYPE]
        } else {
            entry.subtypes.iter().map(String::as_str).collect()
        };

        for subtype in subtypes {
            match group.subtypes.iter_mut().find(|s| s.subtype == subtype) {
                Some(bucket) => bucket.entries.push(entry.clone()),
                None => group.subtypes.push(SubtypeGroup {
                    subtype: subtype.to_string(),
                    entries: vec![entry.clone()],
                }),
            }
        }
    }

    groups
}

/// Service implementing every catalog operation.
///
/// Each operation loads the full catalog, works on it in memory and saves it
/// back only once the new catalog is complete. Failed operations never write.
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
    classifier: Arc<dyn Classifier>,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Creates a new catalog service.
    pub fn new(repository: Arc<R>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            repository,
            classifier,
        }
    }

    /// Adds a new entry for `input` (domain or URL).
    ///
    /// When no name, description or type is supplied, the classifier is asked
    /// for metadata; fields the user supplied always win over its answer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingInput`] if `input` is absent or blank.
    /// Returns [`AppError::Conflict`] if an entry with the same domain exists.
    /// Returns [`AppError::Storage`] if the catalog cannot be read or written.
    pub async fn add(
        &self,
        input: Option<&str>,
        fields: LinkFields,
    ) -> Result<AddedEntry, AppError> {
        let (url, domain) = resolve_input(input)?;

        let mut entries = self.repository.load().await?;

        if entries.iter().any(|e| e.domain() == domain) {
            return Err(AppError::conflict(
                format!("Entry for {domain} already exists"),
                json!({ "domain": domain, "url": url }),
            ));
        }

        let (fields, classification) = if fields.has_descriptive() {
            (fields, ClassificationOutcome::NotRequested)
        } else {
            match self.classifier.classify(&url).await {
                Ok(ai) => {
                    debug!(url = %url, "Using classifier metadata");
                    (fields.backfill(ai), ClassificationOutcome::Applied)
                }
                Err(ClassifierError::Disabled) => {
                    debug!(url = %url, "Classifier disabled, using defaults");
                    (
                        fields,
                        ClassificationOutcome::Unavailable(ClassifierError::Disabled.to_string()),
                    )
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Classification failed, using defaults");
                    (fields, ClassificationOutcome::Unavailable(e.to_string()))
                }
            }
        };

        let entry = LinkEntry::create(url, &domain, fields, now_timestamp());
        entries.push(entry.clone());
        self.repository.save(&entries).await?;

        info!(link = %entry.link, domain = %domain, "Entry added");

        Ok(AddedEntry {
            entry,
            classification,
        })
    }

    /// Updates the entry matching `input` by domain.
    ///
    /// Only supplied, non-empty fields are overwritten; `date_updated` is
    /// always refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingInput`] if `input` is blank.
    /// Returns [`AppError::NotFound`] if no entry has the same domain.
    /// Returns [`AppError::Storage`] if the catalog cannot be read or written.
    pub async fn edit(&self, input: &str, fields: LinkFields) -> Result<LinkEntry, AppError> {
        let (url, domain) = resolve_input(Some(input))?;

        let mut entries = self.repository.load().await?;

        let entry = entries
            .iter_mut()
            .find(|e| e.domain() == domain)
            .ok_or_else(|| not_found(&url, &domain))?;

        entry.apply(fields, now_timestamp());
        let updated = entry.clone();

        self.repository.save(&entries).await?;

        info!(link = %updated.link, "Entry updated");

        Ok(updated)
    }

    /// Removes every entry whose domain matches `input`.
    ///
    /// Returns the normalized URL that was looked up and the removed entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingInput`] if `input` is absent or blank.
    /// Returns [`AppError::NotFound`] if nothing matched; the catalog is not
    /// rewritten in that case.
    /// Returns [`AppError::Storage`] if the catalog cannot be read or written.
    pub async fn remove(&self, input: Option<&str>) -> Result<(String, Vec<LinkEntry>), AppError> {
        let (url, domain) = resolve_input(input)?;

        let entries = self.repository.load().await?;

        let (removed, kept): (Vec<LinkEntry>, Vec<LinkEntry>) =
            entries.into_iter().partition(|e| e.domain() == domain);

        if removed.is_empty() {
            return Err(not_found(&url, &domain));
        }

        self.repository.save(&kept).await?;

        info!(url = %url, removed = removed.len(), "Entry removed");

        Ok((url, removed))
    }

    /// Case-insensitive substring search over name, link, domain,
    /// description, type, subtypes, tags and roles.
    ///
    /// Results keep catalog order. No match is an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the catalog cannot be read.
    pub async fn find(&self, query: &str) -> Result<Vec<LinkEntry>, AppError> {
        let needle = query.to_lowercase();
        let entries = self.repository.load().await?;

        let results: Vec<LinkEntry> = entries.into_iter().filter(|e| e.matches(&needle)).collect();
        debug!(query, matches = results.len(), "Search finished");

        Ok(results)
    }

    /// Returns the whole catalog in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the catalog cannot be read.
    pub async fn list(&self) -> Result<Vec<LinkEntry>, AppError> {
        self.repository.load().await
    }

    /// Returns the entry matching `input` by domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingInput`] if `input` is blank.
    /// Returns [`AppError::NotFound`] if no entry has the same domain.
    /// Returns [`AppError::Storage`] if the catalog cannot be read.
    pub async fn view(&self, input: &str) -> Result<LinkEntry, AppError> {
        let (url, domain) = resolve_input(Some(input))?;

        self.repository
            .load()
            .await?
            .into_iter()
            .find(|e| e.domain() == domain)
            .ok_or_else(|| not_found(&url, &domain))
    }

    /// Returns the catalog grouped by type and subtype.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the catalog cannot be read.
    pub async fn grouped(&self) -> Result<Vec<TypeGroup>, AppError> {
        let entries = self.repository.load().await?;
        Ok(group_entries(&entries))
    }
}

/// Normalizes `input` into its URL and domain key.
///
/// Blank input and input without a host (`/`, `https://`) count as missing.
fn resolve_input(input: Option<&str>) -> Result<(String, String), AppError> {
    let missing = || AppError::missing_input("No domain or URL provided");

    let input = input
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(missing)?;

    let (url, domain) = resolve(input);
    if domain.is_empty() {
        debug!(input, url = %url, "Input has no host");
        return Err(missing());
    }

    Ok((url, domain))
}

fn not_found(url: &str, domain: &str) -> AppError {
    AppError::not_found(
        format!("No entry found for {url}"),
        json!({ "url": url, "domain": domain }),
    )
}
