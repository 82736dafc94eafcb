// Error types module
use indicium_commons::{DatabaseName, RecordKey, TableName};
use indicium_configs::ConfigError;
use indicium_filestore::FilestoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, IndiciumError>;

/// Main error type for Indicium
#[derive(Error, Debug)]
pub enum IndiciumError {
    #[error("{0} is not ready")]
    NotReady(String),

    #[error("{0} has already been loaded")]
    AlreadyInitialized(String),

    #[error("Record '{key}' not found in table '{table}'")]
    NotFound { table: TableName, key: RecordKey },

    #[error("Table directory does not exist: {}", .0.display())]
    TableMissing(PathBuf),

    #[error("Database directory does not exist: {}", .0.display())]
    DatabaseMissing(PathBuf),

    #[error("Table already exists: {0}")]
    DuplicateTable(TableName),

    #[error("Database already exists: {0}")]
    DuplicateDatabase(DatabaseName),

    #[error("Table not found: {0}")]
    TableNotFound(TableName),

    #[error("Database not found: {0}")]
    DatabaseNotFound(DatabaseName),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid update for '{0}': expected a JSON object or dotted-path pairs")]
    InvalidPatch(RecordKey),

    #[error("Failed to parse record: {0}")]
    ParseFailure(#[source] FilestoreError),

    #[error("IO error: {0}")]
    Io(#[source] FilestoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<FilestoreError> for IndiciumError {
    fn from(err: FilestoreError) -> Self {
        match err {
            FilestoreError::Parse { .. } => IndiciumError::ParseFailure(err),
            other => IndiciumError::Io(other),
        }
    }
}

impl IndiciumError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, IndiciumError::NotFound { .. })
    }

    pub fn is_not_ready(&self) -> bool {
        matches!(self, IndiciumError::NotReady(_))
    }
}
