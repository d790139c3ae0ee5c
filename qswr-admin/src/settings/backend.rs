//! Settings backend trait.

use async_trait::async_trait;

use super::Preference;
use super::Preferences;
use super::SettingsError;

/// Storage behind [`super::SettingsProvider`].
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Everything saved so far; unset preferences are `None`.
    async fn load(&self) -> Result<Preferences, SettingsError>;

    /// Saves one preference and leaves the others alone.
    async fn store(&self, change: Preference) -> Result<(), SettingsError>;
}
