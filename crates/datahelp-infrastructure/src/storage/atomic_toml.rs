//! Atomic TOML file operations.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use datahelp_core::error::DataHelpError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use super::file_lock::{FileLock, write_atomic};

/// Errors that can occur during atomic TOML operations.
#[derive(Error, Debug)]
pub enum AtomicTomlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<AtomicTomlError> for DataHelpError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Serialize(e) => e.into(),
        }
    }
}

/// A handle to a TOML file that is replaced atomically on save.
///
/// - **Atomicity**: tmp file + rename
/// - **Isolation**: `update` holds an exclusive lock across read-modify-write
/// - **Durability**: fsync before rename
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let toml_string = toml::to_string_pretty(data)?;
        write_atomic(&self.path, toml_string.as_bytes())?;
        Ok(())
    }

    /// Transactional update under an exclusive file lock.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T, AtomicTomlError>
    where
        F: FnOnce(&mut T),
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data);
        self.save(&data)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Settings {
        title: String,
        delay_ms: u64,
    }

    fn defaults() -> Settings {
        Settings {
            title: "default".to_string(),
            delay_ms: 0,
        }
    }

    #[test]
    fn test_load_missing_and_empty_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        let file = AtomicTomlFile::<Settings>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_applies_on_top_of_saved_value() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Settings>::new(temp_dir.path().join("settings.toml"));

        file.update(defaults(), |s| s.delay_ms += 250).unwrap();
        let updated = file.update(defaults(), |s| s.delay_ms += 250).unwrap();

        assert_eq!(updated.delay_ms, 500);
        assert_eq!(file.load().unwrap(), Some(updated));
    }

    #[test]
    fn test_parse_error_maps_to_serialization() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "title = [unclosed").unwrap();

        let err = AtomicTomlFile::<Settings>::new(path).load().unwrap_err();
        assert!(matches!(err, AtomicTomlError::Parse(_)));
        assert!(DataHelpError::from(err).is_serialization());
    }
}
