//! SQLite settings backend.

use std::path::Path;
use std::path::PathBuf;

use async_sqlite::Client;
use async_trait::async_trait;
use rusqlite::params;

use super::Preference;
use super::Preferences;
use super::SettingsBackend;
use super::SettingsError;

/// One row holding every preference in its own column.
pub struct SqliteSettingsBackend {
    client: Client,
}

impl SqliteSettingsBackend {
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let client = async_sqlite::ClientBuilder::new()
            .path(path)
            .open()
            .await?;

        client
            .conn(|conn| {
                conn.execute_batch(
                    "CREATE TABLE IF NOT EXISTS preferences (
                        id INTEGER PRIMARY KEY CHECK (id = 1),
                        page_size INTEGER,
                        export_dir TEXT,
                        last_search TEXT
                    );
                    INSERT OR IGNORE INTO preferences (id) VALUES (1);",
                )
            })
            .await?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SettingsBackend for SqliteSettingsBackend {
    async fn load(&self) -> Result<Preferences, SettingsError> {
        let prefs = self
            .client
            .conn(|conn| {
                conn.query_row(
                    "SELECT page_size, export_dir, last_search FROM preferences WHERE id = 1",
                    [],
                    |row| {
                        let page_size: Option<i64> = row.get(0)?;
                        let export_dir: Option<String> = row.get(1)?;
                        Ok(Preferences {
                            page_size: page_size.and_then(|n| usize::try_from(n).ok()),
                            export_dir: export_dir.map(PathBuf::from),
                            last_search: row.get(2)?,
                        })
                    },
                )
            })
            .await?;
        Ok(prefs)
    }

    async fn store(&self, change: Preference) -> Result<(), SettingsError> {
        log::debug!("saving {:?}", change);
        self.client
            .conn(move |conn| match &change {
                Preference::PageSize(size) => conn.execute(
                    "UPDATE preferences SET page_size = ?1 WHERE id = 1",
                    params![*size as i64],
                ),
                Preference::ExportDir(dir) => conn.execute(
                    "UPDATE preferences SET export_dir = ?1 WHERE id = 1",
                    params![dir.to_string_lossy().into_owned()],
                ),
                Preference::LastSearch(term) => conn.execute(
                    "UPDATE preferences SET last_search = ?1 WHERE id = 1",
                    params![term],
                ),
            })
            .await?;
        Ok(())
    }
}
