//! Table: one directory of JSON records mirrored by an in-memory cache.
//!
//! ## Cache contract
//!
//! Once a table is `Ready` its cache holds every record whose file parsed at load
//! time plus every record created or updated since. A cached key is authoritative
//! for reads; keys missing from the cache fall back to disk and are cached on first
//! read.
//!
//! ## Writes
//!
//! `update` runs read → merge → atomic write → cache replace under a per-key async
//! mutex, so for any key the order of cache mutations matches the order of disk
//! writes. Updates to different keys run concurrently.

use crate::error::{IndiciumError, Result};
use crate::readiness::{ensure_ready, run_load};
use dashmap::DashMap;
use indicium_commons::json::deep_merge;
use indicium_commons::{Lifecycle, LifecycleState, Record, RecordKey, TableName, UpdateInput};
use indicium_filestore::{ops, PathUtils};
use parking_lot::{RwLock, RwLockReadGuard};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;

/// Handle to a single table.
pub struct Table {
    name: TableName,
    path: PathBuf,
    lifecycle: Lifecycle,
    cache: RwLock<HashMap<RecordKey, Record>>,
    /// Per-key write locks; entries are dropped once no writer holds them
    write_locks: DashMap<RecordKey, Arc<TokioMutex<()>>>,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("state", &self.lifecycle.state())
            .field("records", &self.cache.read().len())
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Create an unloaded handle for `<database_dir>/<name>`.
    ///
    /// Every operation fails with `NotReady` until [`Table::load`] completes.
    /// Prefer [`Table::open`] or [`Table::create`].
    pub fn new(database_dir: &Path, name: TableName) -> Self {
        let path = PathUtils::table_path(database_dir, &name);
        Self {
            name,
            path,
            lifecycle: Lifecycle::new(),
            cache: RwLock::new(HashMap::new()),
            write_locks: DashMap::new(),
        }
    }

    /// Open an existing table directory and load its records.
    pub async fn open(database_dir: &Path, name: TableName) -> Result<Self> {
        let table = Self::new(database_dir, name);
        table.load().await?;
        Ok(table)
    }

    /// Create the table directory (if needed) and load it.
    pub async fn create(database_dir: &Path, name: TableName) -> Result<Self> {
        name.validate().map_err(IndiciumError::InvalidName)?;
        ops::make_dir(&PathUtils::table_path(database_dir, &name)).await?;
        Self::open(database_dir, name).await
    }

    /// Load every record file into the cache. Runs once per handle.
    pub async fn load(&self) -> Result<()> {
        run_load(&self.lifecycle, self.subject(), async {
            let records = self.read_records().await?;
            let count = records.len();
            *self.cache.write() = records;
            log::info!("Table '{}' loaded with {} records", self.name, count);
            Ok::<(), IndiciumError>(())
        })
        .await
    }

    async fn read_records(&self) -> Result<HashMap<RecordKey, Record>> {
        if !ops::is_dir(&self.path).await? {
            return Err(IndiciumError::TableMissing(self.path.clone()));
        }

        let mut records = HashMap::new();
        for file_name in ops::list_dir(&self.path).await? {
            let Some(key) = RecordKey::from_file_name(&file_name) else {
                continue;
            };
            if let Err(reason) = key.validate() {
                log::warn!("Skipping record file '{}' in table '{}': {}", file_name, self.name, reason);
                continue;
            }
            let file_path = self.path.join(&file_name);
            if ops::is_dir(&file_path).await? {
                continue;
            }

            match ops::read_json(&file_path).await {
                Ok(value) => {
                    records.insert(key, value);
                }
                Err(e @ indicium_filestore::FilestoreError::Parse { .. }) => {
                    log::warn!("Skipping record '{}' in table '{}': {}", key, self.name, e);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(records)
    }

    pub fn name(&self) -> &TableName {
        &self.name
    }

    /// Directory holding this table's records.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    /// Whether a record exists, in the cache or on disk.
    pub async fn has(&self, key: impl Into<RecordKey>) -> Result<bool> {
        let key = self.checked_key(key)?;
        let cached = self.cache.read().contains_key(&key);
        if cached {
            return Ok(true);
        }
        Ok(ops::exists(&self.record_path(&key)).await?)
    }

    /// Fetch a record, reading it from disk into the cache on a cache miss.
    pub async fn get(&self, key: impl Into<RecordKey>) -> Result<Record> {
        let key = self.checked_key(key)?;
        self.read_record(&key).await
    }

    async fn read_record(&self, key: &RecordKey) -> Result<Record> {
        let cached = self.cache.read().get(key).cloned();
        if let Some(value) = cached {
            return Ok(value);
        }

        let path = self.record_path(key);
        if !ops::exists(&path).await? {
            return Err(IndiciumError::NotFound {
                table: self.name.clone(),
                key: key.clone(),
            });
        }

        let value = ops::read_json(&path).await?;
        // A concurrent update may have cached a newer value meanwhile
        let cached = self
            .cache
            .write()
            .entry(key.clone())
            .or_insert(value)
            .clone();
        Ok(cached)
    }

    /// Deep-merge `patch` into a record and persist it.
    ///
    /// A missing record starts from `{}`. `patch` is a JSON object or a list of
    /// `(dotted.path, value)` pairs. Returns the merged record.
    pub async fn update(&self, key: impl Into<RecordKey>, patch: impl Into<UpdateInput>) -> Result<Record> {
        let key = self.checked_key(key)?;
        let input: UpdateInput = patch.into();
        let patch = input
            .into_patch()
            .ok_or_else(|| IndiciumError::InvalidPatch(key.clone()))?;

        let lock = WriteLockHandle::acquire(&self.write_locks, &key);
        let _guard = lock.mutex().lock().await;
        self.merge_and_persist(&key, &patch).await
    }

    async fn merge_and_persist(&self, key: &RecordKey, patch: &Value) -> Result<Record> {
        let mut record = match self.read_record(key).await {
            Ok(existing) => existing,
            Err(IndiciumError::NotFound { .. }) => Value::Object(Map::new()),
            Err(e) => return Err(e),
        };
        deep_merge(&mut record, patch);

        ops::atomic_write_json(&self.record_path(key), &record).await?;
        self.cache.write().insert(key.clone(), record.clone());

        log::debug!("Updated record '{}' in table '{}'", key, self.name);
        Ok(record)
    }

    /// Live view over the cached records.
    ///
    /// The view borrows the cache: writers wait until it is dropped, so keep it
    /// short-lived and never hold it across an `.await`.
    pub fn entries(&self) -> Result<TableEntries<'_>> {
        ensure_ready(&self.lifecycle, self.subject())?;
        Ok(TableEntries {
            guard: self.cache.read(),
        })
    }

    /// Cached keys, sorted.
    pub fn keys(&self) -> Result<Vec<RecordKey>> {
        ensure_ready(&self.lifecycle, self.subject())?;
        let mut keys: Vec<RecordKey> = self.cache.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Number of cached records.
    pub fn len(&self) -> Result<usize> {
        ensure_ready(&self.lifecycle, self.subject())?;
        Ok(self.cache.read().len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn checked_key(&self, key: impl Into<RecordKey>) -> Result<RecordKey> {
        ensure_ready(&self.lifecycle, self.subject())?;
        let key = key.into();
        key.validate().map_err(IndiciumError::InvalidName)?;
        Ok(key)
    }

    fn record_path(&self, key: &RecordKey) -> PathBuf {
        PathUtils::record_path(&self.path, key)
    }

    fn subject(&self) -> String {
        format!("Table '{}'", self.name)
    }
}

/// Shared handle on one key's write lock.
///
/// Dropping the handle prunes the lock table entry once no other writer holds
/// it, including when the owning `update` future is cancelled mid-wait.
struct WriteLockHandle<'a> {
    locks: &'a DashMap<RecordKey, Arc<TokioMutex<()>>>,
    key: RecordKey,
    mutex: Arc<TokioMutex<()>>,
}

impl<'a> WriteLockHandle<'a> {
    fn acquire(locks: &'a DashMap<RecordKey, Arc<TokioMutex<()>>>, key: &RecordKey) -> Self {
        let mutex = locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(TokioMutex::new(())))
            .clone();
        Self {
            locks,
            key: key.clone(),
            mutex,
        }
    }

    fn mutex(&self) -> &TokioMutex<()> {
        &self.mutex
    }
}

impl Drop for WriteLockHandle<'_> {
    fn drop(&mut self) {
        // Two references left means the map's and ours
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 2);
    }
}

/// Borrowed view over a table's cache, see [`Table::entries`].
pub struct TableEntries<'a> {
    guard: RwLockReadGuard<'a, HashMap<RecordKey, Record>>,
}

impl<'a> TableEntries<'a> {
    /// Iterate over `(key, record)` pairs. May be called any number of times.
    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &Record)> + '_ {
        self.guard.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.guard.get(key)
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a, 'b> IntoIterator for &'b TableEntries<'a> {
    type Item = (&'b RecordKey, &'b Record);
    type IntoIter = std::collections::hash_map::Iter<'b, RecordKey, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.guard.iter()
    }
}
