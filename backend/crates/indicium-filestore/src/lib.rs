//! # indicium-filestore
//!
//! Filesystem operations for Indicium.
//!
//! This crate owns every interaction with the disk:
//! - Directory discovery (list entries, filter subdirectories)
//! - Record files (read JSON, atomic JSON writes via temp file + rename)
//! - Directory creation and recursive removal
//! - Path layout for `<root>/<database>/<table>/<key>.json`
//!
//! All operations are async and run on `tokio::fs`.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use indicium_filestore::{ops, PathUtils};
//!
//! let table_dir = PathUtils::table_path(&PathUtils::database_path(root, &db), &table);
//! ops::make_dir(&table_dir).await?;
//! ops::atomic_write_json(&PathUtils::record_path(&table_dir, &key), &value).await?;
//! ```

pub mod error;
pub mod ops;
pub mod path_utils;

pub use error::{FilestoreError, Result};
pub use path_utils::PathUtils;
