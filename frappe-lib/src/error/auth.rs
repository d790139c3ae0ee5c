//! Authentication error types

/// Errors that can occur during authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid username or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The login endpoint refused the request for another reason.
    #[error("Login rejected: {message}")]
    LoginRejected { message: String },

    /// The backend said "Logged In" but did not set a `sid` cookie.
    #[error("Login succeeded but no session cookie was set")]
    SessionCookieMissing,

    /// No stored session is available.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),

    /// The credentials store could not be read.
    #[error("Credentials store error: {0}")]
    Store(String),
}
