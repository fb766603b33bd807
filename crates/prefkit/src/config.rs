//! Store location configuration.

use std::path::PathBuf;

use crate::error::{PrefsError, Result};

/// Default store name, used as the database file stem.
pub const DEFAULT_STORE_NAME: &str = "API_SETTINGS_FILE";

/// Directory created under the platform config dir when none is given.
pub const APP_DIR_NAME: &str = "prefkit";

/// Where a persistent preference store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesConfig {
    /// Store name; the database file is `<name>.db`.
    pub name: String,
    /// Directory holding the database. `None` resolves to
    /// `<platform config dir>/prefkit`.
    pub directory: Option<PathBuf>,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_STORE_NAME.to_string(),
            directory: None,
        }
    }
}

impl PreferencesConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// The directory the database lives in.
    pub fn resolve_directory(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or_else(|| PrefsError::Config("cannot find config directory".into())),
        }
    }

    /// Full path of the database file.
    pub fn path(&self) -> Result<PathBuf> {
        if self.name.is_empty() {
            return Err(PrefsError::Config("store name must not be empty".into()));
        }
        Ok(self.resolve_directory()?.join(format!("{}.db", self.name)))
    }
}
