//! Application configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::preference::{DEFAULT_LANGUAGE, Language};

/// Settings read from `config.toml`, then overridden by `DATAHELP_*`
/// environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// Language used before the user picks one.
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Simulated work per pipeline stage (default: 1000).
    #[serde(default = "default_delay_ms")]
    pub stage_delay_ms: u64,
    /// Simulated export time (default: 1000).
    #[serde(default = "default_delay_ms")]
    pub download_delay_ms: u64,
    #[serde(default)]
    pub debug: bool,
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_app_title() -> String {
    "DataHelp".to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_delay_ms() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_title: default_app_title(),
            default_language: default_language(),
            stage_delay_ms: default_delay_ms(),
            download_delay_ms: default_delay_ms(),
            debug: false,
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub const ENV_STAGE_DELAY_MS: &'static str = "DATAHELP_STAGE_DELAY_MS";
    pub const ENV_DOWNLOAD_DELAY_MS: &'static str = "DATAHELP_DOWNLOAD_DELAY_MS";
    pub const ENV_DEFAULT_LANGUAGE: &'static str = "DATAHELP_DEFAULT_LANGUAGE";
    pub const ENV_DEBUG: &'static str = "DATAHELP_DEBUG";
    pub const ENV_DATA_DIR: &'static str = "DATAHELP_DATA_DIR";

    /// Applies environment overrides read through `lookup`.
    ///
    /// Values that fail to parse are ignored and logged; the file value
    /// stays in effect.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = parse_env(&lookup, Self::ENV_STAGE_DELAY_MS) {
            self.stage_delay_ms = ms;
        }
        if let Some(ms) = parse_env(&lookup, Self::ENV_DOWNLOAD_DELAY_MS) {
            self.download_delay_ms = ms;
        }
        if let Some(code) = lookup(Self::ENV_DEFAULT_LANGUAGE) {
            match Language::from_code(&code) {
                Some(language) => self.default_language = language.code().to_string(),
                None => tracing::warn!(code = %code, "[Config] Ignoring unsupported default language"),
            }
        }
        if let Some(raw) = lookup(Self::ENV_DEBUG) {
            self.debug = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(dir) = lookup(Self::ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// The configured default language, or English if the value is unknown.
    pub fn language(&self) -> Language {
        Language::from_code(&self.default_language).unwrap_or_default()
    }
}

fn parse_env<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "[Config] Ignoring non-numeric override");
            None
        }
    }
}
