//! Command handlers.
//!
//! Every handler takes the shared [`Context`], does its work and raises
//! toasts for the outcome. Errors bubble up to `main`, which turns them into
//! an error toast and an exit code.

pub mod dashboard;
pub mod login;
pub mod logout;
pub mod profile;
pub mod projects;

use std::io::BufRead;
use std::io::Write;
use std::time::Duration;

use frappe_lib::FrappeClient;

use crate::error::AppError;
use crate::paths::AppPaths;
use crate::projects::ProjectService;
use crate::session::SessionStore;
use crate::session::SqliteSessionBackend;
use crate::session::StoredSession;
use crate::settings::SettingsProvider;
use crate::settings::SqliteSettingsBackend;
use crate::toast::Toaster;

/// Time allowed for the TCP/TLS handshake.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// State shared by every command of one run.
#[derive(Clone)]
pub struct Context {
    base_url: String,
    timeout: Option<Duration>,
    http: reqwest::Client,
    pub sessions: SessionStore,
    pub settings: SettingsProvider,
    pub toaster: Toaster,
}

impl Context {
    /// Opens the session and settings stores under `paths`.
    pub async fn open(
        paths: &AppPaths,
        base_url: &str,
        timeout: Option<Duration>,
        toaster: Toaster,
    ) -> Result<Self, AppError> {
        let sessions = SessionStore::new(SqliteSessionBackend::new(paths.session_db()).await?);
        let settings = SettingsProvider::new(SqliteSettingsBackend::new(paths.settings_db()).await?);
        Self::new(base_url, timeout, sessions, settings, toaster)
    }

    /// Fails when the HTTP client cannot be built, e.g. when TLS cannot be
    /// initialised.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        sessions: SessionStore,
        settings: SettingsProvider,
        toaster: Toaster,
    ) -> Result<Self, AppError> {
        let mut http = reqwest::Client::builder().connect_timeout(CONNECT_TIMEOUT);
        if let Some(timeout) = timeout {
            http = http.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            http: http.build()?,
            sessions,
            settings,
            toaster,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// HTTP client carrying the configured timeouts.
    pub fn http(&self) -> reqwest::Client {
        self.http.clone()
    }

    /// A client authenticated from the session cache.
    pub fn client(&self) -> FrappeClient {
        let builder = FrappeClient::builder()
            .url(&self.base_url)
            .credentials(self.sessions.credentials_provider())
            .http_client(self.http());
        match self.timeout {
            Some(timeout) => builder.timeout(timeout).build(),
            None => builder.build(),
        }
    }

    /// The stored session for this backend, or [`AppError::NotLoggedIn`].
    ///
    /// Every command that talks to work orders goes through here first.
    pub async fn require_session(&self) -> Result<StoredSession, AppError> {
        self.sessions
            .authenticated(&self.base_url)
            .await?
            .ok_or(AppError::NotLoggedIn)
    }

    /// Work order service for a logged in user.
    pub async fn projects(&self) -> Result<ProjectService, AppError> {
        self.require_session().await?;
        Ok(ProjectService::new(self.client()))
    }

    /// Raises the error toast for `err`.
    pub fn report(&self, err: &AppError) {
        if err.needs_toast() {
            self.toaster.error(err.toast_title(), err.toast_message());
        }
    }
}

/// Asks a yes/no question on the terminal. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> Result<bool, AppError> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{} [y/N] ", question)?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "نعم")
}

#[cfg(test)]
pub(crate) mod testing {
    use tempfile::TempDir;

    use super::*;

    /// A context whose stores live in a temporary directory.
    pub async fn context(dir: &TempDir) -> Context {
        let paths = AppPaths::rooted(dir.path());
        paths.ensure().unwrap();
        Context::open(&paths, "https://qswr.sa/", None, Toaster::new())
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(is_yes("نعم"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }

    #[tokio::test]
    async fn test_protected_commands_need_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = testing::context(&dir).await;

        assert_eq!(ctx.base_url(), "https://qswr.sa");
        assert!(matches!(ctx.require_session().await, Err(AppError::NotLoggedIn)));
        assert!(matches!(ctx.projects().await, Err(AppError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_context_keeps_request_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::rooted(dir.path());
        paths.ensure().unwrap();

        let ctx = Context::open(&paths, "https://qswr.sa", Some(Duration::from_secs(3)), Toaster::new())
            .await
            .unwrap();
        assert_eq!(ctx.timeout(), Some(Duration::from_secs(3)));
    }
}
