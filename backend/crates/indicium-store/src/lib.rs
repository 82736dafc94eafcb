//! # indicium-store
//!
//! Embedded JSON document store backed by plain files.
//!
//! Data is laid out as `<root>/<database>/<table>/<key>.json`. Each handle
//! (`Client`, `Database`, `Table`) starts unloaded and must be loaded once
//! before use; the async `open` constructors do both steps.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use indicium_store::{Client, ClientOptions};
//! use serde_json::json;
//!
//! # async fn run() -> indicium_store::Result<()> {
//! let client = Client::open(ClientOptions::at("/tmp/indicium")).await?;
//! let users = client.default_database()?.get_or_create_table("users").await?;
//!
//! users.update("u1", json!({ "name": "Ann", "age": 30 })).await?;
//! users.update("u1", vec![("age", json!(31))]).await?;
//!
//! assert_eq!(users.get("u1").await?["age"], 31);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod database;
pub mod error;
mod readiness;
pub mod table;

pub use client::Client;
pub use database::Database;
pub use error::{IndiciumError, Result};
pub use table::{Table, TableEntries};

pub use indicium_commons::{
    DatabaseName, LifecycleState, Record, RecordKey, TableName, UpdateInput,
};
pub use indicium_configs::ClientOptions;
