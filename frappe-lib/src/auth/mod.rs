//! Authentication

mod cookies;
mod credentials;
mod password;

pub use cookies::SessionCookies;
pub use credentials::Credentials;
pub use credentials::CredentialsProvider;
pub use credentials::StaticCredentials;
pub use password::LoginMethod;
pub use password::LoginOutcome;
pub use password::PasswordFlow;
