//! Core domain entities representing the catalog data model.
//!
//! # Entity Types
//!
//! - [`LinkEntry`] - One cataloged website, as persisted in the catalog file
//! - [`LinkFields`] - Field values supplied by the user for add/edit
//! - [`Classification`] - Metadata inferred by the classifier
//!
//! All entities include unit tests demonstrating their construction and usage.

pub mod classification;
pub mod link_entry;
pub mod link_fields;

pub use classification::{Classification, ClassificationMetrics};
pub use link_entry::{LinkEntry, Metrics};
pub use link_fields::LinkFields;
