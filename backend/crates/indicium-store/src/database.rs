//! Database: a directory of tables.
//!
//! Membership checks (`has_table`, `table`, `table_names`) read the in-memory
//! registry only. Table creation and deletion are serialized through an async
//! DDL lock so the registry and the directory tree change together.

use crate::error::{IndiciumError, Result};
use crate::readiness::{ensure_ready, run_load};
use crate::table::Table;
use futures_util::future::try_join_all;
use indicium_commons::{DatabaseName, Lifecycle, LifecycleState, TableName};
use indicium_filestore::{ops, PathUtils};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;

/// Handle to a database and its tables.
pub struct Database {
    name: DatabaseName,
    path: PathBuf,
    lifecycle: Lifecycle,
    tables: RwLock<HashMap<TableName, Arc<Table>>>,
    ddl_lock: TokioMutex<()>,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("state", &self.lifecycle.state())
            .field("tables", &self.tables.read().len())
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Create an unloaded handle for `<root>/<name>`.
    pub fn new(root: &Path, name: DatabaseName) -> Self {
        let path = PathUtils::database_path(root, &name);
        Self {
            name,
            path,
            lifecycle: Lifecycle::new(),
            tables: RwLock::new(HashMap::new()),
            ddl_lock: TokioMutex::new(()),
        }
    }

    /// Open (creating the directory if missing) and load every table.
    pub async fn open(root: &Path, name: DatabaseName) -> Result<Self> {
        let database = Self::new(root, name);
        database.load().await?;
        Ok(database)
    }

    /// Validate the name, then [`Database::open`].
    pub async fn create(root: &Path, name: DatabaseName) -> Result<Self> {
        name.validate().map_err(IndiciumError::InvalidName)?;
        Self::open(root, name).await
    }

    /// Discover table subdirectories and load them. Runs once per handle.
    pub async fn load(&self) -> Result<()> {
        run_load(&self.lifecycle, self.subject(), async {
            ops::make_dir(&self.path).await?;

            let names = ops::list_subdirectories(&self.path).await?;
            let tables = try_join_all(
                names
                    .into_iter()
                    .map(|name| Table::open(&self.path, TableName::new(name))),
            )
            .await?;

            let mut registry = self.tables.write();
            for table in tables {
                registry.insert(table.name().clone(), Arc::new(table));
            }
            log::info!("Database '{}' loaded with {} tables", self.name, registry.len());
            Ok::<(), IndiciumError>(())
        })
        .await
    }

    pub fn name(&self) -> &DatabaseName {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    /// Create a new, empty table.
    ///
    /// Fails with `DuplicateTable` if the name is already registered and with
    /// `DatabaseMissing` if the database directory has disappeared.
    pub async fn create_table(&self, name: impl Into<TableName>) -> Result<Arc<Table>> {
        ensure_ready(&self.lifecycle, self.subject())?;
        let name = name.into();
        name.validate().map_err(IndiciumError::InvalidName)?;

        let _ddl = self.ddl_lock.lock().await;
        let exists = self.tables.read().contains_key(&name);
        if exists {
            return Err(IndiciumError::DuplicateTable(name));
        }
        if !ops::is_dir(&self.path).await? {
            return Err(IndiciumError::DatabaseMissing(self.path.clone()));
        }

        let table = Arc::new(Table::create(&self.path, name.clone()).await?);
        self.tables.write().insert(name.clone(), Arc::clone(&table));
        log::debug!("Created table '{}' in database '{}'", name, self.name);
        Ok(table)
    }

    /// Remove a table and all of its records.
    ///
    /// Returns `false` (and does nothing) when the table is not registered.
    /// Outstanding `Arc<Table>` handles stay readable from cache but can no
    /// longer persist writes.
    pub async fn delete_table(&self, name: impl Into<TableName>) -> Result<bool> {
        ensure_ready(&self.lifecycle, self.subject())?;
        let name = name.into();

        let _ddl = self.ddl_lock.lock().await;
        let registered = self.tables.read().get(&name).cloned();
        let Some(table) = registered else {
            return Ok(false);
        };

        ops::remove_dir_recursive(table.path()).await?;
        self.tables.write().remove(&name);
        log::debug!("Deleted table '{}' from database '{}'", name, self.name);
        Ok(true)
    }

    /// Registry-only membership test; never touches the disk.
    pub fn has_table(&self, name: &str) -> Result<bool> {
        ensure_ready(&self.lifecycle, self.subject())?;
        Ok(self.tables.read().contains_key(name))
    }

    pub fn table(&self, name: &str) -> Result<Arc<Table>> {
        ensure_ready(&self.lifecycle, self.subject())?;
        self.tables
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| IndiciumError::TableNotFound(TableName::new(name)))
    }

    /// Return the table, creating it first if it does not exist.
    pub async fn get_or_create_table(&self, name: impl Into<TableName>) -> Result<Arc<Table>> {
        let name = name.into();
        match self.create_table(name.clone()).await {
            Ok(table) => Ok(table),
            Err(IndiciumError::DuplicateTable(_)) => self.table(name.as_str()),
            Err(e) => Err(e),
        }
    }

    /// Registered table names, sorted.
    pub fn table_names(&self) -> Result<Vec<TableName>> {
        ensure_ready(&self.lifecycle, self.subject())?;
        let mut names: Vec<TableName> = self.tables.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn subject(&self) -> String {
        format!("Database '{}'", self.name)
    }
}
