use indicium_commons::{DatabaseName, RecordKey, TableName};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Utilities for generating consistent storage paths.
///
/// Layout: `<root>/<database>/<table>/<key>.json`. Names are joined verbatim and
/// must already have been validated by the caller.
pub struct PathUtils;

impl PathUtils {
    /// Get the directory for a database under the client root
    pub fn database_path(root: &Path, database: &DatabaseName) -> PathBuf {
        root.join(database.as_str())
    }

    /// Get the directory for a table under its database directory
    pub fn table_path(database_dir: &Path, table: &TableName) -> PathBuf {
        database_dir.join(table.as_str())
    }

    /// Get the file holding a single record
    pub fn record_path(table_dir: &Path, key: &RecordKey) -> PathBuf {
        table_dir.join(key.file_name())
    }

    /// Staging file used by atomic writes: `<file>.tmp` next to the target.
    pub fn temp_path(target: &Path) -> PathBuf {
        let mut name: OsString = target.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_layout() {
        let root = Path::new("/data");
        let db = PathUtils::database_path(root, &DatabaseName::new("app"));
        let table = PathUtils::table_path(&db, &TableName::new("users"));
        let record = PathUtils::record_path(&table, &RecordKey::new("u1"));

        assert_eq!(record, PathBuf::from("/data/app/users/u1.json"));
    }

    #[test]
    fn test_temp_path_keeps_full_name() {
        let target = Path::new("/data/app/users/v1.2.json");
        assert_eq!(
            PathUtils::temp_path(target),
            PathBuf::from("/data/app/users/v1.2.json.tmp")
        );
    }
}
