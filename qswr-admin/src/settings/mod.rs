//! Persistent user preferences.
//!
//! Each preference has its own typed column; the provider validates values
//! on the way in and out.

mod backend;
mod sqlite;

pub use backend::SettingsBackend;
pub use sqlite::SqliteSettingsBackend;

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use datatable::PAGE_SIZE_OPTIONS;
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Everything remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Rows per page of the projects table.
    pub page_size: Option<usize>,
    /// Directory exports are written to.
    pub export_dir: Option<PathBuf>,
    /// The last search term given to `projects list`.
    pub last_search: Option<String>,
}

/// A change to one preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preference {
    PageSize(usize),
    ExportDir(PathBuf),
    /// `None` forgets the term.
    LastSearch(Option<String>),
}

/// Typed settings provider.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub async fn load(&self) -> Result<Preferences, SettingsError> {
        self.backend.load().await
    }

    /// The stored page size, if it is one of the offered options.
    pub async fn page_size(&self) -> Result<Option<usize>, SettingsError> {
        let size = self.load().await?.page_size;
        if let Some(size) = size.filter(|s| !PAGE_SIZE_OPTIONS.contains(s)) {
            log::warn!("ignoring stored page size {}", size);
            return Ok(None);
        }
        Ok(size)
    }

    pub async fn set_page_size(&self, size: usize) -> Result<(), SettingsError> {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return Err(SettingsError::InvalidValue {
                key: "page_size",
                reason: format!("{} is not one of {:?}", size, PAGE_SIZE_OPTIONS),
            });
        }
        self.backend.store(Preference::PageSize(size)).await
    }

    pub async fn export_dir(&self) -> Result<Option<PathBuf>, SettingsError> {
        Ok(self.load().await?.export_dir)
    }

    pub async fn set_export_dir(&self, dir: &Path) -> Result<(), SettingsError> {
        self.backend
            .store(Preference::ExportDir(dir.to_path_buf()))
            .await
    }

    pub async fn last_search(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.load().await?.last_search)
    }

    /// Remembers a search term; an empty term forgets it.
    pub async fn remember_search(&self, term: &str) -> Result<(), SettingsError> {
        let term = term.trim();
        let term = (!term.is_empty()).then(|| term.to_string());
        self.backend.store(Preference::LastSearch(term)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn backend(dir: &tempfile::TempDir) -> SqliteSettingsBackend {
        SqliteSettingsBackend::new(dir.path().join("settings.db"))
            .await
            .unwrap()
    }

    async fn provider(dir: &tempfile::TempDir) -> SettingsProvider {
        SettingsProvider::new(backend(dir).await)
    }

    #[tokio::test]
    async fn test_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let settings = provider(&dir).await;

        assert_eq!(settings.page_size().await.unwrap(), None);
        settings.set_page_size(25).await.unwrap();
        assert_eq!(settings.page_size().await.unwrap(), Some(25));
        assert!(matches!(
            settings.set_page_size(7).await,
            Err(SettingsError::InvalidValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_memory() {
        let dir = tempfile::tempdir().unwrap();
        let settings = provider(&dir).await;

        settings.remember_search("  محمد ").await.unwrap();
        assert_eq!(settings.last_search().await.unwrap().as_deref(), Some("محمد"));
        settings.remember_search("").await.unwrap();
        assert_eq!(settings.last_search().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let settings = provider(&dir).await;
        settings.set_export_dir(Path::new("/srv/exports")).await.unwrap();
        settings.set_page_size(50).await.unwrap();
        drop(settings);

        let prefs = provider(&dir).await.load().await.unwrap();
        assert_eq!(
            prefs,
            Preferences {
                page_size: Some(50),
                export_dir: Some(PathBuf::from("/srv/exports")),
                last_search: None,
            }
        );
    }

    #[tokio::test]
    async fn test_stored_page_size_outside_options_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let raw = backend(&dir).await;
        raw.store(Preference::PageSize(7)).await.unwrap();

        let settings = SettingsProvider::new(raw);
        assert_eq!(settings.load().await.unwrap().page_size, Some(7));
        assert_eq!(settings.page_size().await.unwrap(), None);
    }
}
