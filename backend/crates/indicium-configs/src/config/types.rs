use super::defaults::*;
use super::error::ConfigError;
use indicium_commons::DatabaseName;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options recognized when opening a client.
///
/// ```toml
/// path = "/var/lib/indicium"   # optional, overrides `directory`
/// directory = "data"           # used as <cwd>/bwd/<directory> when `path` is unset
/// database = "default"
/// production = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Root directory override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Subdirectory name under the default working root
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Name of the database provisioned when the root holds none
    #[serde(default = "default_database")]
    pub database: String,

    /// Carried for callers; the store does not interpret it
    #[serde(default = "default_production")]
    pub production: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            path: None,
            directory: default_directory(),
            database: default_database(),
            production: default_production(),
        }
    }
}

impl ClientOptions {
    /// Options rooted at an explicit directory.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Name of the default database.
    pub fn default_database(&self) -> DatabaseName {
        DatabaseName::new(self.database.clone())
    }

    /// Resolve the client root directory.
    ///
    /// `path` wins when set; otherwise `<cwd>/bwd/<directory>`.
    pub fn resolve_root(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let cwd = std::env::current_dir()?;
        Ok(cwd.join(DEFAULT_WORKING_ROOT).join(&self.directory))
    }
}
