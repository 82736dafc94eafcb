//! Validation for names that become path components on disk.
//!
//! Database names, table names and record keys are all used verbatim as directory
//! or file names, so anything that could escape the owning directory is rejected.

/// Validate a single path component.
///
/// `context` names the kind of value being checked ("Table name", "Record key", ...)
/// and is used as the prefix of the error message.
///
/// # Example
/// ```
/// use indicium_commons::naming::validate_name;
///
/// assert!(validate_name("users", "Table name").is_ok());
/// assert!(validate_name("user-42", "Record key").is_ok());
/// assert!(validate_name("../etc", "Table name").is_err());
/// assert!(validate_name("", "Database name").is_err());
/// ```
pub fn validate_name(name: &str, context: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("{} cannot be empty", context));
    }

    if name.contains("..") {
        return Err(format!(
            "{} contains path traversal sequence '..': {}",
            context, name
        ));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(format!("{} contains path separator: {}", context, name));
    }

    if name.starts_with('.') {
        return Err(format!("{} cannot start with '.': {}", context, name));
    }

    if name.contains('\0') {
        return Err(format!("{} contains null byte", context));
    }

    Ok(())
}

/// Whether a directory entry should be ignored during discovery.
///
/// Hidden entries (leading `.`) are never databases or tables.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
