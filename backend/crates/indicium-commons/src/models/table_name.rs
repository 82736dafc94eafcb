//! Type-safe wrapper for table names.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::validate_name;

/// Type-safe wrapper for table names.
///
/// Ensures table names cannot be accidentally used where database names or record
/// keys are expected. Table names are case-preserving: the name is also the table's
/// directory name, so `Users` and `users` are different tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Creates a new TableName from a string.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Checks that the name can be used as a directory name.
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.0, "Table name")
    }

    /// Returns the table name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TableName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TableName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_preserves_case() {
        let upper = TableName::new("Users");
        let lower = TableName::new("users");

        assert_ne!(upper, lower);
        assert_eq!(upper.as_str(), "Users");
        assert_eq!(format!("{}", upper), "Users");
    }

    #[test]
    fn test_table_name_validation() {
        assert!(TableName::new("users").validate().is_ok());
        assert!(TableName::new("").validate().is_err());
        assert!(TableName::new("a/b").validate().is_err());
    }
}
