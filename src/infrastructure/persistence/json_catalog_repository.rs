//! JSON file implementation of the catalog repository.

use std::borrow::Cow;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Local;
use regex::Regex;
use serde_json::json;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::entities::LinkEntry;
use crate::domain::repositories::CatalogRepository;
use crate::error::{AppError, map_io_error};

static TRAILING_COMMA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").unwrap());

/// Removes commas that directly precede a closing brace or bracket.
///
/// Hand-edited catalogs often end up with `[{...},]`; this makes them
/// parseable again. Commas inside string values are not distinguished.
pub fn strip_trailing_commas(content: &str) -> Cow<'_, str> {
    TRAILING_COMMA_REGEX.replace_all(content, "$1")
}

/// Catalog stored as a single pretty-printed JSON array.
///
/// Every save rewrites the whole file through a temporary file in the same
/// directory followed by a rename, so a crash never leaves a truncated
/// catalog behind.
///
/// When a load finds a file that is not valid JSON, the catalog is treated
/// as empty and the parse error is kept in [`Self::load_error`]. The next
/// save copies the unreadable file to `<path>.corrupt-<timestamp>` before
/// overwriting it; that copy is reported by [`Self::backup`].
pub struct JsonFileCatalogRepository {
    path: PathBuf,
    load_error: Mutex<Option<String>>,
    backup: Mutex<Option<PathBuf>>,
}

impl JsonFileCatalogRepository {
    /// Creates a repository backed by the file at `path`.
    ///
    /// The file is not touched until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            load_error: Mutex::new(None),
            backup: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse error from the most recent load, if it had to discard the file.
    pub fn load_error(&self) -> Option<String> {
        self.load_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Where the unreadable catalog was copied before being overwritten.
    pub fn backup(&self) -> Option<PathBuf> {
        self.backup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_load_error(&self, error: Option<String>) {
        *self.load_error.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }

    fn backup_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(format!(".corrupt-{}", Local::now().format("%Y%m%d%H%M%S")));
        PathBuf::from(name)
    }

    /// Copies the unreadable catalog aside before it gets overwritten.
    async fn backup_unreadable_file(&self) -> Result<(), AppError> {
        let backup = self.backup_path();

        match fs::copy(&self.path, &backup).await {
            Ok(_) => {
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    "Backed up unreadable catalog before overwriting it"
                );
                *self.backup.lock().unwrap_or_else(PoisonError::into_inner) = Some(backup);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error("back up", &self.path, e)),
        }
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[async_trait]
impl CatalogRepository for JsonFileCatalogRepository {
    async fn load(&self) -> Result<Vec<LinkEntry>, AppError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Catalog file does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(map_io_error("read", &self.path, e)),
        };

        let content = raw.trim();
        if content.is_empty() {
            debug!(path = %self.path.display(), "Catalog file is empty");
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<LinkEntry>>(&strip_trailing_commas(content)) {
            Ok(entries) => {
                debug!(path = %self.path.display(), count = entries.len(), "Catalog loaded");
                Ok(entries)
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Catalog file is not valid JSON, treating it as empty"
                );
                self.set_load_error(Some(e.to_string()));
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, entries: &[LinkEntry]) -> Result<(), AppError> {
        let mut body = serde_json::to_string_pretty(entries).map_err(|e| {
            AppError::storage(
                format!("Failed to serialize catalog: {e}"),
                json!({ "path": self.path.display().to_string() }),
            )
        })?;
        body.push('\n');

        if self.load_error().is_some() {
            self.backup_unreadable_file().await?;
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error("create directory for", &self.path, e))?;
        }

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, body.as_bytes()))
            .await
            .map_err(|e| {
                AppError::storage(
                    format!("Catalog write task failed: {e}"),
                    json!({ "path": self.path.display().to_string() }),
                )
            })?
            .map_err(|e| map_io_error("write", &self.path, e))?;

        self.set_load_error(None);
        info!(path = %self.path.display(), count = entries.len(), "Catalog saved");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(link: &str, name: &str) -> LinkEntry {
        LinkEntry {
            link: link.to_string(),
            name: name.to_string(),
            date_collected: "2024-01-01T00:00:00.000000".to_string(),
            date_updated: "2024-01-01T00:00:00.000000".to_string(),
            ..LinkEntry::default()
        }
    }

    #[test]
    fn test_strip_trailing_commas() {
        assert_eq!(strip_trailing_commas("[1, 2,]"), "[1, 2]");
        assert_eq!(strip_trailing_commas("{\"a\": 1,\n  }"), "{\"a\": 1}");
        assert_eq!(strip_trailing_commas("[{\"a\": [1,],},]"), "[{\"a\": [1]}]");
        assert_eq!(strip_trailing_commas("[1, 2]"), "[1, 2]");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let repo = JsonFileCatalogRepository::new(dir.path().join("links.json"));

        let entries = repo.load().await.unwrap();

        assert!(entries.is_empty());
        assert!(repo.load_error().is_none());
    }

    #[tokio::test]
    async fn test_load_whitespace_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(&path, "  \n\t\n").unwrap();

        let repo = JsonFileCatalogRepository::new(&path);

        assert!(repo.load().await.unwrap().is_empty());
        assert!(repo.load_error().is_none());
    }

    #[tokio::test]
    async fn test_load_tolerates_trailing_commas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(
            &path,
            r#"[
  {
    "link": "https://example.com",
    "name": "Example",
    "tags": ["a", "b",],
  },
]"#,
        )
        .unwrap();

        let repo = JsonFileCatalogRepository::new(&path);
        let entries = repo.load().await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Example");
        assert_eq!(entries[0].tags, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_save_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        let repo = JsonFileCatalogRepository::new(&path);

        repo.save(&[entry("https://example.com", "Café ünïcode")])
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"link\": \"https://example.com\""));
        assert!(raw.ends_with("]\n"));
        assert!(raw.contains("Café ünïcode"));
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("links.json");
        let repo = JsonFileCatalogRepository::new(&path);

        repo.save(&[entry("https://example.com", "Example")])
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let repo = JsonFileCatalogRepository::new(dir.path().join("links.json"));
        let entries = vec![
            entry("https://b.com", "B"),
            entry("https://a.com", "A"),
            entry("https://c.com", "C"),
        ];

        repo.save(&entries).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded, entries);
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty_and_is_backed_up_on_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(&path, "[{\"link\": \"https://example.com\"").unwrap();

        let repo = JsonFileCatalogRepository::new(&path);

        assert!(repo.load().await.unwrap().is_empty());
        assert!(repo.load_error().is_some());
        assert!(repo.backup().is_none());

        repo.save(&[entry("https://new.com", "New")]).await.unwrap();

        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".corrupt-"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            std::fs::read_to_string(backups[0].path()).unwrap(),
            "[{\"link\": \"https://example.com\""
        );
        assert!(repo.load_error().is_none());
        assert_eq!(repo.backup(), Some(backups[0].path()));
        assert_eq!(repo.load().await.unwrap()[0].name, "New");
    }

    #[tokio::test]
    async fn test_load_directory_is_storage_error() {
        let dir = tempdir().unwrap();
        let repo = JsonFileCatalogRepository::new(dir.path());

        let result = repo.load().await;

        assert!(matches!(result.unwrap_err(), AppError::Storage { .. }));
    }
}
