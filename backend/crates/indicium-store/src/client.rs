//! Client: the root handle, owning a directory of databases.
//!
//! Opening a client discovers every database under the root. When the root holds
//! no database at all, the configured default database is created so callers
//! always have somewhere to write. Table-level methods on the client act on that
//! default database.

use crate::database::Database;
use crate::error::{IndiciumError, Result};
use crate::readiness::{ensure_ready, run_load};
use crate::table::Table;
use futures_util::future::try_join_all;
use indicium_commons::{DatabaseName, Lifecycle, LifecycleState, TableName};
use indicium_configs::ClientOptions;
use indicium_filestore::{ops, PathUtils};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;

/// Root handle of the store.
pub struct Client {
    options: ClientOptions,
    root: PathBuf,
    default_database: DatabaseName,
    lifecycle: Lifecycle,
    databases: RwLock<HashMap<DatabaseName, Arc<Database>>>,
    ddl_lock: TokioMutex<()>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("root", &self.root)
            .field("default_database", &self.default_database)
            .field("production", &self.options.production)
            .field("state", &self.lifecycle.state())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Build an unloaded client from validated options.
    pub fn new(options: ClientOptions) -> Result<Self> {
        options.validate()?;
        let root = options.resolve_root()?;
        let default_database = options.default_database();

        Ok(Self {
            options,
            root,
            default_database,
            lifecycle: Lifecycle::new(),
            databases: RwLock::new(HashMap::new()),
            ddl_lock: TokioMutex::new(()),
        })
    }

    /// Build a client and load it. The returned client is always `Ready`.
    pub async fn open(options: ClientOptions) -> Result<Self> {
        let client = Self::new(options)?;
        client.load().await?;
        Ok(client)
    }

    /// Discover databases under the root. Runs once per handle.
    pub async fn load(&self) -> Result<()> {
        run_load(&self.lifecycle, self.subject(), async {
            ops::make_dir(&self.root).await?;

            let names = ops::list_subdirectories(&self.root).await?;
            let mut databases = try_join_all(
                names
                    .into_iter()
                    .map(|name| Database::open(&self.root, DatabaseName::new(name))),
            )
            .await?;

            if databases.is_empty() {
                log::info!(
                    "No databases under {}, creating '{}'",
                    self.root.display(),
                    self.default_database
                );
                databases.push(Database::create(&self.root, self.default_database.clone()).await?);
            }

            let mut registry = self.databases.write();
            for database in databases {
                registry.insert(database.name().clone(), Arc::new(database));
            }
            log::info!("Client loaded {} databases from {}", registry.len(), self.root.display());
            Ok::<(), IndiciumError>(())
        })
        .await
    }

    /// Root directory holding the databases.
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn is_production(&self) -> bool {
        self.options.production
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    /// Create a new database directory and register it.
    pub async fn create_database(&self, name: impl Into<DatabaseName>) -> Result<Arc<Database>> {
        ensure_ready(&self.lifecycle, self.subject())?;
        let name = name.into();
        name.validate().map_err(IndiciumError::InvalidName)?;

        let _ddl = self.ddl_lock.lock().await;
        let exists = self.databases.read().contains_key(&name);
        if exists {
            return Err(IndiciumError::DuplicateDatabase(name));
        }

        let database = Arc::new(Database::create(&self.root, name.clone()).await?);
        self.databases.write().insert(name.clone(), Arc::clone(&database));
        log::debug!("Created database '{}'", name);
        Ok(database)
    }

    /// Remove a database with all its tables. No-op when not registered.
    pub async fn delete_database(&self, name: impl Into<DatabaseName>) -> Result<bool> {
        ensure_ready(&self.lifecycle, self.subject())?;
        let name = name.into();

        let _ddl = self.ddl_lock.lock().await;
        let exists = self.databases.read().contains_key(&name);
        if !exists {
            return Ok(false);
        }

        ops::remove_dir_recursive(&PathUtils::database_path(&self.root, &name)).await?;
        self.databases.write().remove(&name);
        log::debug!("Deleted database '{}'", name);
        Ok(true)
    }

    /// Registry-only membership test.
    pub fn has_database(&self, name: &str) -> Result<bool> {
        ensure_ready(&self.lifecycle, self.subject())?;
        Ok(self.databases.read().contains_key(name))
    }

    pub fn database(&self, name: &str) -> Result<Arc<Database>> {
        ensure_ready(&self.lifecycle, self.subject())?;
        self.databases
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| IndiciumError::DatabaseNotFound(DatabaseName::new(name)))
    }

    /// The database named by `ClientOptions::database`.
    pub fn default_database(&self) -> Result<Arc<Database>> {
        self.database(self.default_database.as_str())
    }

    /// Registered database names, sorted.
    pub fn database_names(&self) -> Result<Vec<DatabaseName>> {
        ensure_ready(&self.lifecycle, self.subject())?;
        let mut names: Vec<DatabaseName> = self.databases.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    // Flattened access: tables of the default database

    pub async fn create_table(&self, name: impl Into<TableName>) -> Result<Arc<Table>> {
        self.default_database()?.create_table(name).await
    }

    pub async fn delete_table(&self, name: impl Into<TableName>) -> Result<bool> {
        self.default_database()?.delete_table(name).await
    }

    pub fn has_table(&self, name: &str) -> Result<bool> {
        self.default_database()?.has_table(name)
    }

    pub fn table(&self, name: &str) -> Result<Arc<Table>> {
        self.default_database()?.table(name)
    }

    fn subject(&self) -> String {
        format!("Client at {}", self.root.display())
    }
}
