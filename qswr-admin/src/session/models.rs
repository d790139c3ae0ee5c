//! Data models for the session cache.

use chrono::DateTime;
use chrono::Utc;
use frappe_lib::auth::Credentials;
use frappe_lib::auth::LoginMethod;
use frappe_lib::auth::LoginOutcome;
use frappe_lib::auth::SessionCookies;
use frappe_lib::model::UserInfo;

/// Everything kept between runs after a successful login.
#[derive(Clone, PartialEq)]
pub struct StoredSession {
    /// Backend the session belongs to.
    pub base_url: String,
    pub method: LoginMethod,
    /// API key, for [`LoginMethod::ApiKey`].
    pub api_key: Option<String>,
    /// API secret, for [`LoginMethod::ApiKey`].
    pub api_secret: Option<String>,
    /// Session id, for [`LoginMethod::Session`].
    pub sid: Option<String>,
    pub user: UserInfo,
    /// Cookies captured from the login responses (`sid`, `user_id`,
    /// `full_name`, `system_user`, ...).
    pub cookies: SessionCookies,
    pub logged_in_at: DateTime<Utc>,
}

impl StoredSession {
    /// Builds the record to store after a login.
    pub fn from_outcome(base_url: impl Into<String>, outcome: &LoginOutcome) -> Self {
        let (api_key, api_secret, sid) = match &outcome.credentials {
            Credentials::ApiKey { key, secret } => (Some(key.clone()), Some(secret.clone()), None),
            Credentials::Session { sid } => (None, None, Some(sid.clone())),
            Credentials::Anonymous => (None, None, None),
        };
        Self {
            base_url: base_url.into(),
            method: outcome.method,
            api_key,
            api_secret,
            sid,
            user: outcome.user.clone(),
            cookies: outcome.cookies.clone(),
            logged_in_at: outcome.logged_in_at,
        }
    }

    /// Credentials to attach to API requests.
    ///
    /// Falls back to the captured `sid` cookie when the session id column
    /// is empty.
    pub fn credentials(&self) -> Credentials {
        match self.method {
            LoginMethod::ApiKey => match &self.api_key {
                Some(key) => Credentials::api_key(key, self.api_secret.clone().unwrap_or_default()),
                None => Credentials::Anonymous,
            },
            LoginMethod::Session => match self.sid.as_deref().or_else(|| self.cookies.sid()) {
                Some(sid) => Credentials::session(sid),
                None => Credentials::Anonymous,
            },
        }
    }

    /// `true` when the record still holds usable credentials.
    pub fn is_authenticated(&self) -> bool {
        !self.credentials().is_anonymous()
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.user.display_name()
    }
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("base_url", &self.base_url)
            .field("method", &self.method)
            .field("user", &self.user.name)
            .field("cookies", &self.cookies.len())
            .field("logged_in_at", &self.logged_in_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(credentials: Credentials, method: LoginMethod) -> LoginOutcome {
        let mut cookies = SessionCookies::new();
        cookies.insert("sid", "cookie-sid");
        cookies.insert("user_id", "ahmed@qswr.sa");
        LoginOutcome {
            credentials,
            method,
            user: UserInfo::new("ahmed@qswr.sa"),
            cookies,
            logged_in_at: Utc::now(),
        }
    }

    #[test]
    fn test_api_key_session() {
        let stored = StoredSession::from_outcome(
            "https://qswr.sa",
            &outcome(Credentials::api_key("k", "s"), LoginMethod::ApiKey),
        );
        assert_eq!(stored.credentials(), Credentials::api_key("k", "s"));
        assert!(stored.is_authenticated());
        assert_eq!(stored.sid, None);
    }

    #[test]
    fn test_session_falls_back_to_cookie() {
        let mut stored = StoredSession::from_outcome(
            "https://qswr.sa",
            &outcome(Credentials::session("abc"), LoginMethod::Session),
        );
        assert_eq!(stored.credentials(), Credentials::session("abc"));

        stored.sid = None;
        assert_eq!(stored.credentials(), Credentials::session("cookie-sid"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let stored = StoredSession::from_outcome(
            "https://qswr.sa",
            &outcome(Credentials::api_key("k", "topsecret"), LoginMethod::ApiKey),
        );
        assert!(!format!("{:?}", stored).contains("topsecret"));
    }
}
