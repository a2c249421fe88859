//! Application error type shared by the catalog service, repositories and CLI.

use serde_json::{Value, json};

/// Errors produced by catalog operations.
///
/// Every variant carries a human-readable message and a structured
/// `details` payload that is logged at debug level by the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No domain or URL was supplied via argument or pipe.
    #[error("{message}")]
    MissingInput { message: String, details: Value },

    /// A field value could not be coerced (e.g. a non-numeric rating).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No entry matches the given identifier.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// An entry for the same domain is already cataloged.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// The catalog file could not be read or written.
    #[error("{message}")]
    Storage { message: String, details: Value },
}

impl AppError {
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::MissingInput {
            message: message.into(),
            details: json!({}),
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    /// Short machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingInput { .. } => "missing_input",
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Storage { .. } => "storage_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::MissingInput { details, .. }
            | AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::Storage { details, .. } => details,
        }
    }

    /// Returns true for outcomes the CLI reports as a status line and then
    /// exits normally. Validation and storage failures are propagated.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            AppError::MissingInput { .. } | AppError::NotFound { .. } | AppError::Conflict { .. }
        )
    }
}

pub fn map_io_error(action: &str, path: &std::path::Path, e: std::io::Error) -> AppError {
    AppError::storage(
        format!("Failed to {action} {}: {e}", path.display()),
        json!({ "path": path.display().to_string(), "kind": format!("{:?}", e.kind()) }),
    )
}
