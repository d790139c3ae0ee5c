//! CredentialsProvider trait and Credentials

use async_trait::async_trait;

use crate::error::AuthError;

/// Credentials attached to every API request.
///
/// Frappe accepts either an API key pair (`Authorization: token key:secret`)
/// or the `sid` session cookie issued by `/api/method/login`.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No credentials; only guest endpoints will answer.
    Anonymous,
    /// API key pair issued by the `rest_auth` login endpoint.
    ApiKey { key: String, secret: String },
    /// Session id from the `sid` cookie.
    Session { sid: String },
}

impl Credentials {
    /// Creates API key credentials.
    pub fn api_key(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::ApiKey {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Creates session cookie credentials.
    pub fn session(sid: impl Into<String>) -> Self {
        Self::Session { sid: sid.into() }
    }

    /// Returns the `Authorization` header value, if these are key credentials.
    pub fn authorization(&self) -> Option<String> {
        match self {
            Self::ApiKey { key, secret } => Some(format!("token {}:{}", key, secret)),
            _ => None,
        }
    }

    /// Returns the `Cookie` header value, if these are session credentials.
    pub fn cookie(&self) -> Option<String> {
        match self {
            Self::Session { sid } => Some(format!("sid={}", sid)),
            _ => None,
        }
    }

    /// Returns `true` for [`Credentials::Anonymous`].
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "Anonymous"),
            Self::ApiKey { key, .. } => f
                .debug_struct("ApiKey")
                .field("key", key)
                .field("secret", &"[REDACTED]")
                .finish(),
            Self::Session { .. } => f
                .debug_struct("Session")
                .field("sid", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Trait for providing credentials to the client.
///
/// The client calls `credentials` before each request, so implementations
/// can read from a store that changes between calls (e.g. after logout).
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Returns the credentials to attach to the next request.
    async fn credentials(&self) -> Result<Credentials, AuthError>;
}

/// A provider that always returns the same credentials.
///
/// # Example
///
/// ```
/// use frappe_lib::auth::StaticCredentials;
///
/// let provider = StaticCredentials::api_key("key", "secret");
/// ```
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Wraps existing credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Static API key credentials.
    pub fn api_key(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(Credentials::api_key(key, secret))
    }

    /// Static session credentials.
    pub fn session(sid: impl Into<String>) -> Self {
        Self::new(Credentials::session(sid))
    }

    /// No credentials at all.
    pub fn anonymous() -> Self {
        Self::new(Credentials::Anonymous)
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentials {
    async fn credentials(&self) -> Result<Credentials, AuthError> {
        Ok(self.credentials.clone())
    }
}
