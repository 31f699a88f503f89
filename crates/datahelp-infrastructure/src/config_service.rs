//! Configuration service.
//!
//! Loads `AppConfig` from `<config dir>/config.toml` and layers the
//! `DATAHELP_*` environment overrides on top.

use datahelp_core::config::AppConfig;
use datahelp_core::error::{DataHelpError, Result};

use crate::paths::DataHelpPaths;
use crate::storage::AtomicTomlFile;

#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: DataHelpPaths,
}

impl ConfigService {
    pub fn new(paths: DataHelpPaths) -> Self {
        Self { paths }
    }

    fn file(&self) -> Result<AtomicTomlFile<AppConfig>> {
        let path = self
            .paths
            .config_file()
            .map_err(|e| DataHelpError::config(e.to_string()))?;
        Ok(AtomicTomlFile::new(path))
    }

    /// File values only. A missing or empty file yields the defaults.
    pub fn load_file(&self) -> Result<AppConfig> {
        let file = self.file()?;
        let config = file.load()?.unwrap_or_default();
        tracing::debug!(path = %file.path().display(), "[ConfigService] Loaded configuration file");
        Ok(config)
    }

    /// File values with overrides from the process environment.
    pub fn load(&self) -> Result<AppConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    pub fn load_with_env<F>(&self, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load_file()?;
        config.apply_env_overrides(lookup);
        Ok(config)
    }

    /// Writes the defaults if no configuration file exists yet.
    pub fn ensure_file(&self) -> Result<AppConfig> {
        let file = self.file()?;
        let config = file.update(AppConfig::default(), |_| {})?;
        tracing::info!(path = %file.path().display(), "[ConfigService] Configuration file ready");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> ConfigService {
        ConfigService::new(DataHelpPaths::new(Some(temp_dir.path())))
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = service(&temp_dir).load_with_env(no_env).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_file_then_env() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let path = temp_dir.path().join("config").join("config.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stage_delay_ms = 5\ndefault_language = \"es\"\n").unwrap();

        let config = service
            .load_with_env(|key| (key == "DATAHELP_STAGE_DELAY_MS").then(|| "0".to_string()))
            .unwrap();
        assert_eq!(config.stage_delay_ms, 0);
        assert_eq!(config.default_language, "es");
    }

    #[test]
    fn test_ensure_file_keeps_existing_values() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let created = service.ensure_file().unwrap();
        assert_eq!(created, AppConfig::default());

        let path = temp_dir.path().join("config").join("config.toml");
        fs::write(&path, "debug = true\n").unwrap();
        assert!(service.ensure_file().unwrap().debug);
        assert!(service.load_with_env(no_env).unwrap().debug);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config").join("config.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "debug = [").unwrap();

        assert!(service(&temp_dir).load_with_env(no_env).unwrap_err().is_serialization());
    }
}
