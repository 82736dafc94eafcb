//! # indicium-commons
//!
//! Shared building blocks used by every Indicium crate:
//!
//! - **Models**: type-safe names for databases, tables and record keys
//! - **Naming**: validation for names that end up as directory or file names
//! - **Lifecycle**: the `Uninitialized → Loading → Ready` state shared by the client,
//!   database and table handles
//! - **JSON**: deep-merge and dotted-path helpers used to apply partial updates
//!
//! ## Example Usage
//!
//! ```rust
//! use indicium_commons::json::{deep_merge, expand_dotted_path};
//! use serde_json::json;
//!
//! let mut record = json!({ "name": "Ann", "stats": { "age": 30 } });
//! deep_merge(&mut record, &expand_dotted_path("stats.age", json!(31)));
//! assert_eq!(record, json!({ "name": "Ann", "stats": { "age": 31 } }));
//! ```

pub mod json;
pub mod lifecycle;
pub mod models;
pub mod naming;

pub use json::{deep_clone, deep_merge, expand_dotted_path, Record, UpdateInput};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use models::{DatabaseName, RecordKey, TableName};

/// File extension used for persisted records.
pub const RECORD_EXTENSION: &str = "json";
