//! Username/password login flow

use chrono::DateTime;
use chrono::Utc;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::Credentials;
use super::SessionCookies;
use crate::error::AuthError;
use crate::error::FrappeErrorDetail;
use crate::model::UserInfo;

const REST_AUTH_LOGIN: &str = "/api/method/rest_auth.rest_auth.api.auth.login";
const SESSION_LOGIN: &str = "/api/method/login";
const LOGGED_IN: &str = "Logged In";

/// How a [`LoginOutcome`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMethod {
    /// The `rest_auth` endpoint issued an API key pair.
    ApiKey,
    /// The stock login endpoint issued a session cookie.
    Session,
}

impl LoginMethod {
    /// Convert to string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginMethod::ApiKey => "api_key",
            LoginMethod::Session => "session",
        }
    }

    /// Parse from a stored string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "api_key" => Some(LoginMethod::ApiKey),
            "session" => Some(LoginMethod::Session),
            _ => None,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Credentials to use for subsequent requests.
    pub credentials: Credentials,
    /// Which endpoint produced the credentials.
    pub method: LoginMethod,
    /// The logged in user.
    pub user: UserInfo,
    /// Every cookie set by the login responses.
    pub cookies: SessionCookies,
    /// When the login completed.
    pub logged_in_at: DateTime<Utc>,
}

/// Username/password login against a Frappe backend.
///
/// Tries the `rest_auth` endpoint first, which hands out an API key pair.
/// When that endpoint answers without a key (or is not installed), falls back
/// to the stock `/api/method/login` session login.
///
/// # Example
///
/// ```ignore
/// use frappe_lib::auth::PasswordFlow;
///
/// let outcome = PasswordFlow::new("https://qswr.sa", "user@qswr.sa", "secret")
///     .login()
///     .await?;
/// ```
#[derive(Clone)]
pub struct PasswordFlow {
    base_url: String,
    username: String,
    password: String,
    http_client: reqwest::Client,
}

impl PasswordFlow {
    /// Creates a new password flow for the given backend.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Uses a custom HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    /// Runs the login.
    pub async fn login(&self) -> Result<LoginOutcome, AuthError> {
        match self.rest_auth_login().await? {
            Some(outcome) => {
                log::info!("logged in as {} with an API key", outcome.user.name);
                Ok(outcome)
            }
            None => {
                log::warn!("rest_auth login returned no API key, falling back to session login");
                let outcome = self.session_login().await?;
                log::info!("logged in as {} with a session cookie", outcome.user.name);
                Ok(outcome)
            }
        }
    }

    /// `Ok(None)` means "try the session login instead".
    async fn rest_auth_login(&self) -> Result<Option<LoginOutcome>, AuthError> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, REST_AUTH_LOGIN))
            .header("Accept", "application/json")
            .json(&json!({
                "username": self.username,
                "password": self.password,
            }))
            .send()
            .await?;

        let status = response.status();
        let cookies = SessionCookies::from_headers(response.headers());
        let body = response.text().await?;

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        let payload: RestAuthResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))?;

        if payload.message.as_deref() != Some(LOGGED_IN) {
            return Ok(None);
        }
        let Some(keys) = payload.key_details.filter(|k| !k.api_key.is_empty()) else {
            return Ok(None);
        };

        let user = match payload.user_details {
            Some(details) => details.into_user_info(),
            None => UserInfo::new(&self.username),
        };

        Ok(Some(LoginOutcome {
            credentials: Credentials::api_key(keys.api_key, keys.api_secret.unwrap_or_default()),
            method: LoginMethod::ApiKey,
            user,
            cookies,
            logged_in_at: Utc::now(),
        }))
    }

    async fn session_login(&self) -> Result<LoginOutcome, AuthError> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, SESSION_LOGIN))
            .header("Accept", "application/json")
            .json(&json!({
                "usr": self.username,
                "pwd": self.password,
            }))
            .send()
            .await?;

        let status = response.status();
        let cookies = SessionCookies::from_headers(response.headers());
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::InvalidCredentials);
        }

        let payload: SessionLoginResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))?;
        if payload.message.as_deref() != Some(LOGGED_IN) {
            return Err(AuthError::InvalidCredentials);
        }

        let sid = cookies.sid().ok_or(AuthError::SessionCookieMissing)?;

        let name = cookies
            .get("user_id")
            .filter(|id| !id.is_empty() && *id != "Guest")
            .unwrap_or(&self.username);
        let mut user = UserInfo::new(name);
        user.full_name = payload
            .full_name
            .or_else(|| cookies.get("full_name").map(str::to_string));

        Ok(LoginOutcome {
            credentials: Credentials::session(sid),
            method: LoginMethod::Session,
            user,
            cookies,
            logged_in_at: Utc::now(),
        })
    }
}

impl std::fmt::Debug for PasswordFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordFlow")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn rejection(status: StatusCode, body: &str) -> AuthError {
    if status == StatusCode::UNAUTHORIZED {
        return AuthError::InvalidCredentials;
    }
    let message = FrappeErrorDetail::from_body(body)
        .map(|detail| detail.summary().to_string())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    AuthError::LoginRejected { message }
}

#[derive(Debug, Deserialize)]
struct RestAuthResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    key_details: Option<KeyDetails>,
    #[serde(default)]
    user_details: Option<UserDetails>,
}

#[derive(Debug, Deserialize)]
struct KeyDetails {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    api_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserDetails {
    name: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl UserDetails {
    fn into_user_info(self) -> UserInfo {
        let full_name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        UserInfo {
            name: self.name,
            full_name: (!full_name.is_empty()).then_some(full_name),
            email: self.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionLoginResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
}
