//! SQLite session backend.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use frappe_lib::auth::LoginMethod;
use frappe_lib::auth::SessionCookies;
use frappe_lib::model::UserInfo;

use super::SessionBackend;
use super::SessionError;
use super::StoredSession;

/// SQLite-backed session storage.
///
/// One row in `session`, one row per captured cookie in `cookies`.
pub struct SqliteSessionBackend {
    client: Client,
}

impl SqliteSessionBackend {
    /// Open (or create) the session database at the given path.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let client = async_sqlite::ClientBuilder::new()
            .path(path)
            .open()
            .await?;

        client
            .conn(|conn| {
                conn.execute_batch(
                    "
                    CREATE TABLE IF NOT EXISTS session (
                        id INTEGER PRIMARY KEY CHECK (id = 1),
                        base_url TEXT NOT NULL,
                        method TEXT NOT NULL,
                        api_key TEXT,
                        api_secret TEXT,
                        sid TEXT,
                        user_name TEXT NOT NULL,
                        full_name TEXT,
                        email TEXT,
                        logged_in_at TEXT NOT NULL
                    );

                    CREATE TABLE IF NOT EXISTS cookies (
                        name TEXT PRIMARY KEY,
                        value TEXT NOT NULL
                    );
                    ",
                )
            })
            .await?;

        Ok(Self { client })
    }
}

/// A `session` row before its text columns are validated.
struct SessionRow {
    base_url: String,
    method: String,
    api_key: Option<String>,
    api_secret: Option<String>,
    sid: Option<String>,
    user_name: String,
    full_name: Option<String>,
    email: Option<String>,
    logged_in_at: String,
}

impl SessionRow {
    fn into_session(self, cookies: SessionCookies) -> Result<StoredSession, SessionError> {
        let method = LoginMethod::parse(&self.method)
            .ok_or_else(|| SessionError::Invalid(format!("unknown login method {:?}", self.method)))?;
        let logged_in_at = DateTime::parse_from_rfc3339(&self.logged_in_at)
            .map_err(|e| SessionError::Invalid(e.to_string()))?
            .with_timezone(&Utc);

        Ok(StoredSession {
            base_url: self.base_url,
            method,
            api_key: self.api_key,
            api_secret: self.api_secret,
            sid: self.sid,
            user: UserInfo {
                name: self.user_name,
                full_name: self.full_name,
                email: self.email,
            },
            cookies,
            logged_in_at,
        })
    }
}

#[async_trait]
impl SessionBackend for SqliteSessionBackend {
    async fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        let loaded = self
            .client
            .conn(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT base_url, method, api_key, api_secret, sid, user_name, full_name, email, logged_in_at
                     FROM session WHERE id = 1",
                )?;
                let mut rows = stmt.query([])?;
                let Some(row) = rows.next()? else {
                    return Ok(None);
                };
                let session = SessionRow {
                    base_url: row.get(0)?,
                    method: row.get(1)?,
                    api_key: row.get(2)?,
                    api_secret: row.get(3)?,
                    sid: row.get(4)?,
                    user_name: row.get(5)?,
                    full_name: row.get(6)?,
                    email: row.get(7)?,
                    logged_in_at: row.get(8)?,
                };

                let mut stmt = conn.prepare("SELECT name, value FROM cookies ORDER BY name")?;
                let cookies = stmt
                    .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
                    .collect::<Result<SessionCookies, _>>()?;

                Ok(Some((session, cookies)))
            })
            .await?;

        match loaded {
            Some((row, cookies)) => row.into_session(cookies).map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        let base_url = session.base_url.clone();
        let method = session.method.as_str();
        let api_key = session.api_key.clone();
        let api_secret = session.api_secret.clone();
        let sid = session.sid.clone();
        let user = session.user.clone();
        let logged_in_at = session.logged_in_at.to_rfc3339();
        let cookies: Vec<(String, String)> = session
            .cookies
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        self.client
            .conn_mut(move |conn| {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM cookies", [])?;
                tx.execute(
                    "INSERT INTO session (id, base_url, method, api_key, api_secret, sid, user_name, full_name, email, logged_in_at)
                     VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                     ON CONFLICT(id) DO UPDATE SET
                         base_url = excluded.base_url,
                         method = excluded.method,
                         api_key = excluded.api_key,
                         api_secret = excluded.api_secret,
                         sid = excluded.sid,
                         user_name = excluded.user_name,
                         full_name = excluded.full_name,
                         email = excluded.email,
                         logged_in_at = excluded.logged_in_at",
                    rusqlite::params![
                        &base_url,
                        method,
                        &api_key,
                        &api_secret,
                        &sid,
                        &user.name,
                        &user.full_name,
                        &user.email,
                        &logged_in_at
                    ],
                )?;
                for (name, value) in &cookies {
                    tx.execute(
                        "INSERT INTO cookies (name, value) VALUES (?, ?)",
                        rusqlite::params![name, value],
                    )?;
                }
                tx.commit()
            })
            .await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.client
            .conn(|conn| conn.execute_batch("DELETE FROM session; DELETE FROM cookies;"))
            .await?;

        Ok(())
    }

    async fn cookie(&self, name: &str) -> Result<Option<String>, SessionError> {
        let name = name.to_string();
        self.client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM cookies WHERE name = ?")?;
                let mut rows = stmt.query([&name])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get(0)?)),
                    None => Ok(None),
                }
            })
            .await
            .map_err(SessionError::from)
    }
}

#[cfg(test)]
mod tests {
    use frappe_lib::auth::Credentials;

    use super::*;

    fn session() -> StoredSession {
        let mut cookies = SessionCookies::new();
        cookies.insert("sid", "s1d");
        cookies.insert("user_id", "ahmed@qswr.sa");
        cookies.insert("full_name", "أحمد علي");
        cookies.insert("system_user", "yes");
        StoredSession {
            base_url: "https://qswr.sa".to_string(),
            method: LoginMethod::Session,
            api_key: None,
            api_secret: None,
            sid: Some("s1d".to_string()),
            user: UserInfo {
                name: "ahmed@qswr.sa".to_string(),
                full_name: Some("أحمد علي".to_string()),
                email: None,
            },
            cookies,
            logged_in_at: DateTime::parse_from_rfc3339("2026-03-01T08:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    async fn backend(dir: &tempfile::TempDir) -> SqliteSessionBackend {
        SqliteSessionBackend::new(dir.path().join("session.db")).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(&dir).await;
        assert!(backend.load().await.unwrap().is_none());
        assert_eq!(backend.cookie("sid").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(&dir).await;

        backend.save(&session()).await.unwrap();
        let loaded = backend.load().await.unwrap().unwrap();
        assert_eq!(loaded, session());
        assert_eq!(loaded.credentials(), Credentials::session("s1d"));
        assert_eq!(backend.cookie("full_name").await.unwrap().as_deref(), Some("أحمد علي"));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_cookies() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(&dir).await;
        backend.save(&session()).await.unwrap();

        let mut next = session();
        next.method = LoginMethod::ApiKey;
        next.api_key = Some("key".to_string());
        next.api_secret = Some("secret".to_string());
        next.sid = None;
        next.cookies = SessionCookies::new();
        backend.save(&next).await.unwrap();

        let loaded = backend.load().await.unwrap().unwrap();
        assert_eq!(loaded.method, LoginMethod::ApiKey);
        assert!(loaded.cookies.is_empty());
        assert_eq!(backend.cookie("system_user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(&dir).await;
        backend.save(&session()).await.unwrap();

        backend.clear().await.unwrap();
        assert!(backend.load().await.unwrap().is_none());
        for name in ["sid", "user_id", "full_name", "system_user"] {
            assert_eq!(backend.cookie(name).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        backend(&dir).await.save(&session()).await.unwrap();

        let reopened = backend(&dir).await;
        assert_eq!(reopened.load().await.unwrap().unwrap().user.name, "ahmed@qswr.sa");
    }
}
