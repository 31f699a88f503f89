//! Preference repository trait.

use async_trait::async_trait;

use crate::error::Result;

/// Repository for user preferences that persist across sessions.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Returns the stored language code, or the default code when unset or
    /// unreadable.
    async fn get_language(&self) -> String;

    /// Persists the language code immediately.
    async fn set_language(&self, code: &str) -> Result<()>;
}
