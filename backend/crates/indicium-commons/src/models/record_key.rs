//! Type-safe wrapper for record keys.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::validate_name;
use crate::RECORD_EXTENSION;

/// Key of a single record within a table.
///
/// A record with key `k` is persisted as `<table dir>/k.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.0, "Record key")
    }

    /// Recover a key from a directory entry name.
    ///
    /// Returns `None` unless the name ends with `.json` and has a non-empty stem.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name
            .strip_suffix(RECORD_EXTENSION)?
            .strip_suffix('.')?;
        if stem.is_empty() {
            return None;
        }
        Some(Self(stem.to_string()))
    }

    /// File name under which this record is persisted.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, RECORD_EXTENSION)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RecordKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
