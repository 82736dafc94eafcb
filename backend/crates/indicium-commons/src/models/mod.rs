//! Type-safe identifiers for the client → database → table → record hierarchy.

mod database_name;
mod record_key;
mod table_name;

pub use database_name::DatabaseName;
pub use record_key::RecordKey;
pub use table_name::TableName;
