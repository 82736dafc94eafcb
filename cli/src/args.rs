use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Indicium CLI - inspect and edit an Indicium data directory
#[derive(Parser, Debug)]
#[command(name = "indicium")]
#[command(author = "Indicium Team")]
#[command(version)]
#[command(about = "Inspect and edit an Indicium document store", long_about = None)]
pub struct Cli {
    /// Root directory of the store (overrides --directory)
    #[arg(long = "path", global = true)]
    pub path: Option<PathBuf>,

    /// Subdirectory under ./bwd used when --path is not given
    #[arg(long = "directory", global = true)]
    pub directory: Option<String>,

    /// Default database name
    #[arg(long = "database", global = true)]
    pub database: Option<String>,

    /// TOML file with client options
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Mark the client as running in production
    #[arg(long = "production", global = true)]
    pub production: bool,

    /// Log filter written to stderr (e.g. "info", "indicium_store=debug")
    #[arg(long = "log-level", global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List databases
    Databases,

    /// List tables of a database
    Tables {
        /// Database to list (defaults to the default database)
        #[arg(long = "db")]
        db: Option<String>,
    },

    /// Create a database
    CreateDatabase { name: String },

    /// Delete a database and everything in it
    DeleteDatabase { name: String },

    /// Create a table
    CreateTable { db: String, table: String },

    /// Delete a table and all its records
    DeleteTable { db: String, table: String },

    /// Print a record
    Get { db: String, table: String, key: String },

    /// Check whether a record exists
    Has { db: String, table: String, key: String },

    /// List record keys of a table
    Keys { db: String, table: String },

    /// Deep-merge a JSON object into a record
    Update {
        db: String,
        table: String,
        key: String,
        /// JSON object to merge
        json: String,
    },

    /// Set one field of a record by dotted path
    Set {
        db: String,
        table: String,
        key: String,
        /// Dotted path, e.g. "profile.address.city"
        #[arg(value_name = "PATH")]
        field: String,
        /// JSON value; anything that does not parse is stored as a string
        value: String,
    },
}
