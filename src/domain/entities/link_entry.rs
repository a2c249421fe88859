//! Link entry entity representing one cataloged resource.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::link_fields::LinkFields;
use crate::utils::url_normalizer::extract_domain;

pub const DEFAULT_TYPE: &str = "website";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_COST: &str = "free";

/// Popularity metrics attached to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub rating: f64,
    pub rating_count: u64,
}

/// A cataloged website with its descriptive metadata.
///
/// Field order matches the on-disk JSON layout. Fields missing from a
/// hand-edited file take their defaults; unknown fields are preserved in
/// `extra` and written back after the known ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkEntry {
    pub link: String,
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
    pub metrics: Metrics,
    pub date_collected: String,
    pub date_updated: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for LinkEntry {
    fn default() -> Self {
        Self {
            link: String::new(),
            name: String::new(),
            description: String::new(),
            entry_type: DEFAULT_TYPE.to_string(),
            subtypes: Vec::new(),
            tags: Vec::new(),
            roles: Vec::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            cost: DEFAULT_COST.to_string(),
            requires_account: false,
            data_types: Vec::new(),
            api_available: false,
            metrics: Metrics::default(),
            date_collected: String::new(),
            date_updated: String::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl LinkEntry {
    /// Builds a new entry for `link`, filling anything not supplied in
    /// `fields` with defaults derived from `domain`.
    ///
    /// Both timestamps are set to `timestamp`.
    pub fn create(link: String, domain: &str, fields: LinkFields, timestamp: String) -> Self {
        let fields = fields.present();

        Self {
            link,
            name: fields.name.unwrap_or_else(|| domain.to_string()),
            description: fields
                .description
                .unwrap_or_else(|| format!("Website for {domain}")),
            entry_type: fields
                .entry_type
                .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            subtypes: fields.subtypes.unwrap_or_default(),
            tags: fields.tags.unwrap_or_default(),
            roles: fields.roles.unwrap_or_default(),
            language: fields
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            cost: fields.cost.unwrap_or_else(|| DEFAULT_COST.to_string()),
            requires_account: fields.requires_account.unwrap_or(false),
            data_types: fields.data_types.unwrap_or_default(),
            api_available: fields.api_available.unwrap_or(false),
            metrics: Metrics {
                rating: fields.rating.unwrap_or(0.0),
                rating_count: fields.rating_count.unwrap_or(0),
            },
            date_collected: timestamp.clone(),
            date_updated: timestamp,
            extra: BTreeMap::new(),
        }
    }

    /// Overwrites the fields present in `fields` and refreshes `date_updated`.
    ///
    /// Empty values are ignored, so a field can be changed but never cleared.
    /// `date_collected` is never touched.
    pub fn apply(&mut self, fields: LinkFields, timestamp: String) {
        let fields = fields.present();

        if let Some(name) = fields.name {
            self.name = name;
        }
        if let Some(description) = fields.description {
            self.description = description;
        }
        if let Some(entry_type) = fields.entry_type {
            self.entry_type = entry_type;
        }
        if let Some(subtypes) = fields.subtypes {
            self.subtypes = subtypes;
        }
        if let Some(tags) = fields.tags {
            self.tags = tags;
        }
        if let Some(roles) = fields.roles {
            self.roles = roles;
        }
        if let Some(language) = fields.language {
            self.language = language;
        }
        if let Some(cost) = fields.cost {
            self.cost = cost;
        }
        if let Some(requires_account) = fields.requires_account {
            self.requires_account = requires_account;
        }
        if let Some(data_types) = fields.data_types {
            self.data_types = data_types;
        }
        if let Some(api_available) = fields.api_available {
            self.api_available = api_available;
        }
        if let Some(rating) = fields.rating {
            self.metrics.rating = rating;
        }
        if let Some(rating_count) = fields.rating_count {
            self.metrics.rating_count = rating_count;
        }

        self.date_updated = timestamp;
    }

    /// Domain key of this entry's link.
    pub fn domain(&self) -> String {
        extract_domain(&self.link)
    }

    /// Case-insensitive substring search over the searchable fields.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        let haystacks = [
            self.name.to_lowercase(),
            self.link.to_lowercase(),
            self.domain().to_lowercase(),
            self.description.to_lowercase(),
            self.entry_type.to_lowercase(),
            self.subtypes.join(" ").to_lowercase(),
            self.tags.join(" ").to_lowercase(),
            self.roles.join(" ").to_lowercase(),
        ];

        haystacks.iter().any(|haystack| haystack.contains(needle))
    }
}
