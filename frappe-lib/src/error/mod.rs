//! Error types

mod api;
mod auth;
mod field;
mod frappe;
mod validation;

pub use api::*;
pub use auth::*;
pub use field::*;
pub use frappe::*;
pub use validation::*;

/// Top-level error returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Credentials could not be obtained or were rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A document field had an unexpected shape.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns the HTTP status code if the backend answered with an error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            _ => None,
        }
    }

    /// Returns `true` if the backend refused the call for lack of permission.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_permission_error())
    }

    /// Returns `true` if the session or key is no longer accepted.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Api(api) => api.status_code() == Some(401),
            Self::Auth(_) => true,
            _ => false,
        }
    }
}
