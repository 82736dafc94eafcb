//! Type-safe wrapper for database names.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::validate_name;

/// Type-safe wrapper for database names.
///
/// A database name is the name of its directory under the client root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseName(String);

impl DatabaseName {
    /// Name of the database the client provisions when the root is empty.
    pub const DEFAULT: &'static str = "default";

    /// Creates a new DatabaseName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Create the default database name
    pub fn default_database() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.0, "Database name")
    }

    /// Returns the database name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DatabaseName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DatabaseName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for DatabaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DatabaseName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_name() {
        assert_eq!(DatabaseName::default_database().as_str(), "default");
        assert!(DatabaseName::default_database().validate().is_ok());
    }

    #[test]
    fn test_serde_is_transparent() {
        let name = DatabaseName::new("app");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"app\"");
        let back: DatabaseName = serde_json::from_str("\"app\"").unwrap();
        assert_eq!(back, name);
    }
}
