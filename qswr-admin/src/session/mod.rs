//! Session cache: the credentials and user of the last login.
//!
//! A convenience cache so commands do not have to log in every run. It is
//! not a security boundary; `logout` wipes it.

mod models;
mod sqlite;

pub use models::StoredSession;
pub use sqlite::SqliteSessionBackend;

use std::sync::Arc;

use async_trait::async_trait;
use frappe_lib::auth::Credentials;
use frappe_lib::auth::CredentialsProvider;
use frappe_lib::error::AuthError;
use thiserror::Error;

/// Session store error type.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("invalid stored session: {0}")]
    Invalid(String),
}

/// Backend trait for session storage.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Returns the stored session, if any.
    async fn load(&self) -> Result<Option<StoredSession>, SessionError>;

    /// Replaces the stored session and its cookies.
    async fn save(&self, session: &StoredSession) -> Result<(), SessionError>;

    /// Removes the session and every captured cookie.
    async fn clear(&self) -> Result<(), SessionError>;

    /// Returns a single captured cookie.
    async fn cookie(&self, name: &str) -> Result<Option<String>, SessionError>;
}

/// Shared handle to the session cache.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl SessionStore {
    /// Create a new session store with the given backend.
    pub fn new(backend: impl SessionBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// The stored session, if any.
    pub async fn current(&self) -> Result<Option<StoredSession>, SessionError> {
        self.backend.load().await
    }

    /// The stored session when it belongs to `base_url` and still holds
    /// credentials. This is the guard every protected command goes through.
    pub async fn authenticated(&self, base_url: &str) -> Result<Option<StoredSession>, SessionError> {
        let session = self.backend.load().await?;
        Ok(session.filter(|s| {
            let same_backend = s.base_url.trim_end_matches('/') == base_url.trim_end_matches('/');
            if !same_backend {
                log::debug!("stored session belongs to {}, not {}", s.base_url, base_url);
            }
            same_backend && s.is_authenticated()
        }))
    }

    pub async fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        log::debug!("storing session for {}", session.user.name);
        self.backend.save(session).await
    }

    pub async fn clear(&self) -> Result<(), SessionError> {
        log::debug!("clearing stored session");
        self.backend.clear().await
    }

    pub async fn cookie(&self, name: &str) -> Result<Option<String>, SessionError> {
        self.backend.cookie(name).await
    }

    /// A credentials provider reading from this store on every request.
    pub fn credentials_provider(&self) -> StoredCredentials {
        StoredCredentials { store: self.clone() }
    }
}

/// [`CredentialsProvider`] backed by the session cache.
///
/// Reads the store on each request, so a logout in between takes effect
/// immediately.
#[derive(Clone)]
pub struct StoredCredentials {
    store: SessionStore,
}

#[async_trait]
impl CredentialsProvider for StoredCredentials {
    async fn credentials(&self) -> Result<Credentials, AuthError> {
        let session = self
            .store
            .current()
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        match session {
            Some(session) if session.is_authenticated() => Ok(session.credentials()),
            _ => Err(AuthError::NotLoggedIn),
        }
    }
}
