//! Store configuration.

use crate::error::{CoreError, CoreResult};
use std::path::PathBuf;

/// File name of the store inside the user's home directory.
pub const DEFAULT_FILE_NAME: &str = ".captainlog.redb";

/// Configuration for opening a log store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the database file.
    pub path: PathBuf,

    /// Whether to create missing parent directories.
    pub create_dirs: bool,
}

impl StoreConfig {
    /// Creates a configuration for the store file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_dirs: true,
        }
    }

    /// Returns the configuration for the per-user default location,
    /// `~/.captainlog.redb`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoHomeDirectory`] if the home directory cannot
    /// be determined.
    pub fn default_location() -> CoreResult<Self> {
        let home = dirs::home_dir().ok_or(CoreError::NoHomeDirectory)?;
        Ok(Self::new(home.join(DEFAULT_FILE_NAME)))
    }

    /// Sets whether to create missing parent directories.
    #[must_use]
    pub fn create_dirs(mut self, value: bool) -> Self {
        self.create_dirs = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_dirs_by_default() {
        let config = StoreConfig::new("/tmp/log.redb");
        assert!(config.create_dirs);
        assert_eq!(config.path, PathBuf::from("/tmp/log.redb"));
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new("log.redb").create_dirs(false);
        assert!(!config.create_dirs);
    }

    #[test]
    fn default_location_is_in_home() {
        if let Ok(config) = StoreConfig::default_location() {
            assert!(config.path.ends_with(DEFAULT_FILE_NAME));
        }
    }
}
