//! Application error type.

use frappe_lib::error::AuthError;
use frappe_lib::error::FieldValidationError;
use thiserror::Error;

use crate::projects::constants::messages;
use crate::session::SessionError;
use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] frappe_lib::error::Error),
    /// A backend call with a command-specific toast title.
    #[error("{title}: {source}")]
    Request {
        title: &'static str,
        source: frappe_lib::error::Error,
    },
    #[error(transparent)]
    Login(#[from] AuthError),
    #[error("session store: {0}")]
    Session(#[from] SessionError),
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("export: {0}")]
    Export(#[from] datatable::ExportError),
    #[error("{}", describe(.0))]
    Validation(Vec<FieldValidationError>),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("no platform data directory; pass --data-dir")]
    NoDataDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("{0}")]
    Usage(String),
    /// Part of a batch failed; each failure already raised its own toast.
    #[error("{0} of the requested operations failed")]
    Incomplete(usize),
}

fn describe(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Wraps a backend error with the toast title to show for it.
    pub fn request(title: &'static str) -> impl FnOnce(frappe_lib::error::Error) -> Self {
        move |source| Self::Request { title, source }
    }

    /// The backend error behind this one, if any.
    pub fn api(&self) -> Option<&frappe_lib::error::Error> {
        match self {
            Self::Api(e) | Self::Request { source: e, .. } => Some(e),
            _ => None,
        }
    }

    /// `true` when the backend no longer accepts the stored session.
    pub fn is_unauthorized(&self) -> bool {
        self.api().is_some_and(|e| e.is_unauthorized())
    }

    /// Title of the toast raised for this error.
    pub fn toast_title(&self) -> &'static str {
        if let Some(api) = self.api() {
            if api.is_permission_error() {
                return messages::PERMISSION_ERROR;
            }
            if api.is_unauthorized() {
                return messages::SESSION_EXPIRED;
            }
        }
        match self {
            Self::Request { title, .. } => title,
            Self::Login(_) => messages::LOGIN_FAILED,
            Self::NotLoggedIn => messages::LOGIN_REQUIRED,
            Self::Validation(_) => messages::SAVE_FAILED,
            Self::Export(_) => messages::EXPORT_FAILED,
            _ => messages::UNKNOWN_ERROR,
        }
    }

    /// Toast body: the backend's own message when it sent one.
    pub fn toast_message(&self) -> String {
        if let Some(frappe_lib::error::Error::Api(api)) = self.api() {
            return match api.frappe_detail() {
                Some(detail) => detail.summary().to_string(),
                None => api.to_string(),
            };
        }
        match self {
            Self::Request { source, .. } => source.to_string(),
            Self::Validation(errors) => crate::projects::describe(errors),
            other => other.to_string(),
        }
    }

    /// `false` when the failure has already been shown to the user.
    pub fn needs_toast(&self) -> bool {
        !matches!(self, Self::Incomplete(_))
    }

    /// Process exit code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::NotLoggedIn | Self::Login(_) => 3,
            other if other.is_unauthorized() => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use frappe_lib::error::ApiError;

    use super::*;

    #[test]
    fn test_permission_error_title() {
        let err = AppError::from(frappe_lib::error::Error::from(ApiError::http(403, "forbidden")));
        assert_eq!(err.toast_title(), messages::PERMISSION_ERROR);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_request_title() {
        let err = AppError::request(messages::FETCH_FAILED)(frappe_lib::error::Error::from(ApiError::http(
            500,
            "Internal Server Error",
        )));
        assert_eq!(err.toast_title(), messages::FETCH_FAILED);

        let err = AppError::request(messages::FETCH_FAILED)(frappe_lib::error::Error::from(ApiError::http(
            403, "no",
        )));
        assert_eq!(err.toast_title(), messages::PERMISSION_ERROR);
    }

    #[test]
    fn test_validation_message() {
        let err = AppError::Validation(vec![
            FieldValidationError::new("wo_num1", messages::WO_NUM_REQUIRED),
            FieldValidationError::new("acc_name1", messages::CUSTOMER_REQUIRED),
        ]);
        assert_eq!(
            err.toast_message(),
            format!("{}\n{}", messages::WO_NUM_REQUIRED, messages::CUSTOMER_REQUIRED)
        );
        assert_eq!(err.toast_title(), messages::SAVE_FAILED);
    }

    #[test]
    fn test_unauthorized_exit_code() {
        let err = AppError::from(frappe_lib::error::Error::from(ApiError::http(401, "expired")));
        assert_eq!(err.toast_title(), messages::SESSION_EXPIRED);
        assert_eq!(err.exit_code(), 3);
        assert_eq!(AppError::NotLoggedIn.exit_code(), 3);
    }
}
