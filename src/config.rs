//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup (after `.env` has been read by
//! `dotenvy`) and validated before any command runs.
//!
//! ## Variables
//!
//! - `OLC_DATA_FILE` - Catalog file path (default: `links.json`)
//! - `COHERE_API_KEY` - Enables AI classification when set and non-empty
//! - `COHERE_API_URL` - Chat endpoint (default: `https://api.cohere.com/v2/chat`)
//! - `COHERE_MODEL` - Chat model (default: `command-a-03-2025`)
//! - `CLASSIFIER_TEMPERATURE` - Sampling temperature (default: 0.3)
//! - `CLASSIFIER_TIMEOUT_SECONDS` - Request timeout (default: 60)
//! - `RUST_LOG` - Log level (default: `warn`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! ```bash
//! export OLC_DATA_FILE="$HOME/.local/share/olc/links.json"
//! export COHERE_API_KEY="your_key_here"
//! ```

use crate::infrastructure::classifier::{DEFAULT_API_URL, DEFAULT_MODEL};
use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Tool configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON catalog file.
    pub data_file: PathBuf,
    /// Cohere API key. `None` disables AI classification.
    pub cohere_api_key: Option<String>,
    pub cohere_api_url: String,
    pub cohere_model: String,
    pub classifier_temperature: f32,
    pub classifier_timeout_seconds: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        let data_file = env::var("OLC_DATA_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("links.json"));

        // Empty key means no classifier
        let cohere_api_key = env::var("COHERE_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let cohere_api_url =
            env::var("COHERE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let cohere_model = env::var("COHERE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let classifier_temperature = env::var("CLASSIFIER_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.3);

        let classifier_timeout_seconds = env::var("CLASSIFIER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Self {
            data_file,
            cohere_api_key,
            cohere_api_url,
            cohere_model,
            classifier_temperature,
            classifier_timeout_seconds,
            log_level,
            log_format,
        }
    }

    /// Replaces the catalog path, e.g. from a command-line flag.
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data_file` is empty
    /// - `log_format` is not `text` or `json`
    /// - `cohere_api_url` is not an HTTP(S) URL
    /// - `classifier_temperature` is outside 0.0..=5.0
    /// - `classifier_timeout_seconds` is 0
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            anyhow::bail!("OLC_DATA_FILE must not be empty");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.cohere_api_url.starts_with("http://") && !self.cohere_api_url.starts_with("https://")
        {
            anyhow::bail!(
                "COHERE_API_URL must start with 'http://' or 'https://', got '{}'",
                self.cohere_api_url
            );
        }

        if !(0.0..=5.0).contains(&self.classifier_temperature) {
            anyhow::bail!(
                "CLASSIFIER_TEMPERATURE must be between 0.0 and 5.0, got {}",
                self.classifier_temperature
            );
        }

        if self.classifier_timeout_seconds == 0 {
            anyhow::bail!("CLASSIFIER_TIMEOUT_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether AI classification is enabled.
    pub fn is_classifier_enabled(&self) -> bool {
        self.cohere_api_key.is_some()
    }

    pub fn classifier_timeout(&self) -> Duration {
        Duration::from_secs(self.classifier_timeout_seconds)
    }

    /// Logs a configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  Data file: {}", self.data_file.display());

        if let Some(ref key) = self.cohere_api_key {
            tracing::debug!(
                "  Classifier: {} via {} (key {})",
                self.cohere_model,
                self.cohere_api_url,
                mask_secret(key)
            );
        } else {
            tracing::debug!("  Classifier: disabled");
        }

        tracing::debug!("  Log level: {}", self.log_level);
        tracing::debug!("  Log format: {}", self.log_format);
    }
}

/// Masks a secret for logging, keeping only its last four characters.
///
/// - `abcdefgh12345678` → `***5678`
/// - `abc` → `***`
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}

/// Loads configuration from environment variables, applies the catalog path
/// override and validates the result.
///
/// # Errors
///
/// Returns an error if validation fails, including for an empty override.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env(data_file: Option<PathBuf>) -> Result<Config> {
    let config = Config::from_env().with_data_file(data_file);
    config.validate()?;
    Ok(config)
}
