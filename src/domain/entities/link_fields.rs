//! User-supplied field values for creating or editing an entry.

use super::classification::Classification;

/// Field values supplied for `add` or `edit`.
///
/// `None` fields are left unchanged (edit) or defaulted (add). Empty strings
/// and empty lists count as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub entry_type: Option<String>,
    pub subtypes: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
    pub language: Option<String>,
    pub cost: Option<String>,
    pub requires_account: Option<bool>,
    pub data_types: Option<Vec<String>>,
    pub api_available: Option<bool>,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
}

fn non_empty_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_list(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty())
}

impl LinkFields {
    /// Drops empty strings and empty lists.
    pub fn present(self) -> Self {
        Self {
            name: non_empty_text(self.name),
            description: non_empty_text(self.description),
            entry_type: non_empty_text(self.entry_type),
            subtypes: non_empty_list(self.subtypes),
            tags: non_empty_list(self.tags),
            roles: non_empty_list(self.roles),
            language: non_empty_text(self.language),
            cost: non_empty_text(self.cost),
            data_types: non_empty_list(self.data_types),
            ..self
        }
    }

    /// True when a name, description or type was supplied.
    ///
    /// An `add` without any of these asks the classifier for metadata.
    pub fn has_descriptive(&self) -> bool {
        [&self.name, &self.description, &self.entry_type]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// Fills every absent field from a classifier result.
    ///
    /// Explicitly supplied values win. The classifier's rating count is
    /// never used.
    pub fn backfill(self, ai: Classification) -> Self {
        let fields = self.present();

        Self {
            name: fields.name.or(non_empty_text(Some(ai.name))),
            description: fields.description.or(non_empty_text(Some(ai.description))),
            entry_type: fields.entry_type.or(non_empty_text(Some(ai.entry_type))),
            subtypes: fields.subtypes.or(non_empty_list(Some(ai.subtypes))),
            tags: fields.tags.or(non_empty_list(Some(ai.tags))),
            roles: fields.roles.or(non_empty_list(Some(ai.roles))),
            language: fields.language.or(non_empty_text(Some(ai.language))),
            cost: fields.cost.or(non_empty_text(Some(ai.cost))),
            requires_account: fields.requires_account.or(Some(ai.requires_account)),
            data_types: fields.data_types.or(non_empty_list(Some(ai.data_types))),
            api_available: fields.api_available.or(Some(ai.api_available)),
            rating: fields.rating.or(Some(ai.metrics.rating)),
            rating_count: fields.rating_count,
        }
    }
}
