//! Language preference backed by a key/value record.

use std::sync::Arc;

use async_trait::async_trait;
use datahelp_core::error::{DataHelpError, Result};
use datahelp_core::preference::{DEFAULT_LANGUAGE, Language, PreferenceRepository};

use crate::storage::KeyValueStore;

/// Storage key of the language code.
pub const LANGUAGE_KEY: &str = "ngo-language";

pub struct KvPreferenceRepository {
    store: Arc<dyn KeyValueStore>,
    default_language: Language,
}

impl KvPreferenceRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            default_language: Language::default(),
        }
    }

    /// Uses `language` when nothing usable is stored.
    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }
}

#[async_trait]
impl PreferenceRepository for KvPreferenceRepository {
    async fn get_language(&self) -> String {
        let fallback = self.default_language.code().to_string();
        match self.store.get(LANGUAGE_KEY).await {
            Ok(Some(raw)) => match Language::from_code(&raw) {
                Some(language) => language.code().to_string(),
                None => {
                    tracing::warn!(stored = %raw.trim(), fallback = %fallback, "[Preference] Unsupported stored language");
                    fallback
                }
            },
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!(error = %e, "[Preference] Failed to read language, using default");
                fallback
            }
        }
    }

    async fn set_language(&self, code: &str) -> Result<()> {
        let language = Language::from_code(code).ok_or_else(|| {
            DataHelpError::config(format!(
                "Unsupported language '{}' (default is '{}')",
                code, DEFAULT_LANGUAGE
            ))
        })?;
        self.store.set(LANGUAGE_KEY, language.code()).await?;
        tracing::info!(language = %language, "[Preference] Language saved");
        Ok(())
    }
}
