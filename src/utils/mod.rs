//! Utility functions for URL processing and field coercion.
//!
//! - [`url_normalizer`] - URL normalization and domain key extraction
//! - [`field_parser`] - List splitting, flag/number coercion and timestamps

pub mod field_parser;
pub mod url_normalizer;
