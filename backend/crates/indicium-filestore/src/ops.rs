//! Async filesystem primitives.
//!
//! Thin wrappers over `tokio::fs` that attach the failing path to every error.

use crate::error::{FilestoreError, Result};
use crate::path_utils::PathUtils;
use indicium_commons::naming::is_hidden;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Whether anything exists at `path`.
pub async fn exists(path: &Path) -> Result<bool> {
    fs::try_exists(path)
        .await
        .map_err(|e| FilestoreError::io(path, e))
}

/// Whether `path` exists and is a directory (symlinks are followed).
pub async fn is_dir(path: &Path) -> Result<bool> {
    match fs::metadata(path).await {
        Ok(md) => Ok(md.is_dir()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FilestoreError::io(path, e)),
    }
}

/// Create `path` and any missing parents.
pub async fn make_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| FilestoreError::io(path, e))
}

/// Names of all entries in a directory, sorted.
///
/// Entries whose names are not valid UTF-8 cannot map to a record key or table
/// name and are skipped.
pub async fn list_dir(path: &Path) -> Result<Vec<String>> {
    let mut entries = fs::read_dir(path)
        .await
        .map_err(|e| FilestoreError::io(path, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| FilestoreError::io(path, e))?
    {
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Skipping non UTF-8 entry {:?} in {}", raw, path.display()),
        }
    }
    names.sort();
    Ok(names)
}

/// Names of the visible subdirectories of `path`, sorted.
pub async fn list_subdirectories(path: &Path) -> Result<Vec<String>> {
    let mut dirs = Vec::new();
    for name in list_dir(path).await? {
        if is_hidden(&name) {
            continue;
        }
        if is_dir(&path.join(&name)).await? {
            dirs.push(name);
        }
    }
    Ok(dirs)
}

/// Read and parse a JSON document.
pub async fn read_json(path: &Path) -> Result<Value> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| FilestoreError::io(path, e))?;

    serde_json::from_slice(&bytes).map_err(|source| FilestoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a JSON document atomically.
///
/// The document is written to `<path>.tmp`, flushed to disk, then renamed over
/// `path`, so readers see either the old or the new content and never a partial
/// file. The staging file is removed if any step fails.
pub async fn atomic_write_json(path: &Path, value: &Value) -> Result<()> {
    let bytes = serde_json::to_vec(value).map_err(|source| FilestoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp_path = PathUtils::temp_path(path);
    if let Err(e) = write_and_sync(&tmp_path, &bytes).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(FilestoreError::io(path, e));
    }

    Ok(())
}

async fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path)
        .await
        .map_err(|e| FilestoreError::io(path, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| FilestoreError::io(path, e))?;
    file.sync_all()
        .await
        .map_err(|e| FilestoreError::io(path, e))?;
    Ok(())
}

/// Remove a directory and everything below it.
///
/// Returns `false` when there was nothing to remove.
pub async fn remove_dir_recursive(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => {
            log::debug!("Removed directory tree {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FilestoreError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_exists_and_is_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.json");
        std::fs::write(&file, "{}").unwrap();

        assert!(exists(dir.path()).await.unwrap());
        assert!(is_dir(dir.path()).await.unwrap());
        assert!(exists(&file).await.unwrap());
        assert!(!is_dir(&file).await.unwrap());
        assert!(!exists(&dir.path().join("missing")).await.unwrap());
        assert!(!is_dir(&dir.path().join("missing")).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_subdirectories_skips_files_and_hidden() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("users")).unwrap();
        std::fs::create_dir(dir.path().join("orders")).unwrap();
        std::fs::create_dir(dir.path().join(".trash")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let all = list_dir(dir.path()).await.unwrap();
        assert_eq!(all, vec![".trash", "notes.txt", "orders", "users"]);

        let dirs = list_subdirectories(dir.path()).await.unwrap();
        assert_eq!(dirs, vec!["orders", "users"]);
    }

    #[tokio::test]
    async fn test_atomic_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("u1.json");
        let value = json!({ "name": "Ann", "tags": [1, 2] });

        atomic_write_json(&path, &value).await.unwrap();

        assert_eq!(read_json(&path).await.unwrap(), value);
        assert!(!exists(&PathUtils::temp_path(&path)).await.unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"name":"Ann","tags":[1,2]}"#
        );
    }

    #[tokio::test]
    async fn test_atomic_write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("u1.json");

        let err = atomic_write_json(&path, &json!({})).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_read_json_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_json(&path).await.unwrap_err();
        assert!(matches!(err, FilestoreError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_remove_dir_recursive() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("db").join("users");
        make_dir(&target).await.unwrap();
        std::fs::write(target.join("u1.json"), "{}").unwrap();

        assert!(remove_dir_recursive(&dir.path().join("db")).await.unwrap());
        assert!(!exists(&dir.path().join("db")).await.unwrap());
        assert!(!remove_dir_recursive(&dir.path().join("db")).await.unwrap());
    }
}
