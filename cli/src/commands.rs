//! One store operation per invocation; every command yields a JSON value.

use crate::args::Command;
use anyhow::Context;
use indicium_store::{Client, ClientOptions, Database};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Option overrides taken from command-line flags.
#[derive(Debug, Default, Clone)]
pub struct OptionOverrides {
    pub path: Option<PathBuf>,
    pub directory: Option<String>,
    pub database: Option<String>,
    pub production: bool,
}

/// Resolve client options: config file (or env defaults), then flags.
pub fn resolve_options(
    config: Option<&PathBuf>,
    overrides: OptionOverrides,
) -> anyhow::Result<ClientOptions> {
    let mut options = match config {
        Some(path) => ClientOptions::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ClientOptions::from_env()?,
    };

    if let Some(path) = overrides.path {
        options.path = Some(path);
    }
    if let Some(directory) = overrides.directory {
        options.directory = directory;
    }
    if let Some(database) = overrides.database {
        options.database = database;
    }
    if overrides.production {
        options.production = true;
    }

    options.validate()?;
    Ok(options)
}

/// Run `command` against a loaded client.
pub async fn execute(client: &Client, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Databases => json!(client.database_names()?),
        Command::Tables { db } => {
            let database = match db {
                Some(name) => client.database(&name)?,
                None => client.default_database()?,
            };
            json!(database.table_names()?)
        }
        Command::CreateDatabase { name } => {
            let database = client.create_database(name).await?;
            json!({ "created": database.name() })
        }
        Command::DeleteDatabase { name } => {
            json!({ "deleted": client.delete_database(name).await? })
        }
        Command::CreateTable { db, table } => {
            let table = database(client, &db)?.create_table(table).await?;
            json!({ "created": table.name() })
        }
        Command::DeleteTable { db, table } => {
            json!({ "deleted": database(client, &db)?.delete_table(table).await? })
        }
        Command::Get { db, table, key } => {
            database(client, &db)?.table(&table)?.get(key).await?
        }
        Command::Has { db, table, key } => {
            json!(database(client, &db)?.table(&table)?.has(key).await?)
        }
        Command::Keys { db, table } => {
            json!(database(client, &db)?.table(&table)?.keys()?)
        }
        Command::Update { db, table, key, json } => {
            let patch: Value = serde_json::from_str(&json)
                .with_context(|| format!("Update for '{}' is not valid JSON", key))?;
            database(client, &db)?
                .get_or_create_table(table)
                .await?
                .update(key, patch)
                .await?
        }
        Command::Set { db, table, key, field, value } => {
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            database(client, &db)?
                .get_or_create_table(table)
                .await?
                .update(key, vec![(field, value)])
                .await?
        }
    };
    Ok(output)
}

fn database(client: &Client, name: &str) -> anyhow::Result<Arc<Database>> {
    client
        .database(name)
        .with_context(|| format!("Unknown database '{}'", name))
}
