use std::path::PathBuf;

use thiserror::Error;

/// Result type for filestore operations.
pub type Result<T> = std::result::Result<T, FilestoreError>;

/// Errors raised by filesystem operations.
///
/// Every variant carries the path that failed so callers can report it without
/// re-deriving it.
#[derive(Error, Debug)]
pub enum FilestoreError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize document for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FilestoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FilestoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file or directory involved in the failure.
    pub fn path(&self) -> &std::path::Path {
        match self {
            FilestoreError::Io { path, .. }
            | FilestoreError::Parse { path, .. }
            | FilestoreError::Serialize { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FilestoreError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
