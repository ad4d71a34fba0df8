//! In-memory transactional storage.
//!
//! Tables are ordered maps of `id -> attributes` with per-table
//! auto-increment. `begin` pushes a snapshot of every table, `rollback`
//! restores the latest one and `commit` discards it, so transactions nest.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::{debug, trace};

use reposervice_core::{
    application::{ApplicationError, ports::Storage},
    domain::{Attributes, Query, RecordId, Row},
    error::RepoServiceResult,
};

/// Thread-safe in-memory storage. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    tables: Tables,
    snapshots: Vec<Tables>,
    read_only: BTreeSet<String>,
}

type Tables = BTreeMap<String, Table>;

#[derive(Debug, Clone, Default)]
struct Table {
    last_id: RecordId,
    rows: BTreeMap<RecordId, Attributes>,
}

impl Table {
    fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.rows
            .iter()
            .map(|(id, attributes)| Row::new(*id, attributes.clone()))
    }
}

impl InMemoryStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert rows outside of any transaction (testing helper).
    pub fn seed(
        &self,
        table: &str,
        rows: impl IntoIterator<Item = Attributes>,
    ) -> RepoServiceResult<Vec<RecordId>> {
        rows.into_iter()
            .map(|attributes| self.insert(table, attributes))
            .collect()
    }

    /// Number of rows in `table`.
    pub fn row_count(&self, table: &str) -> usize {
        self.read()
            .map(|inner| inner.tables.get(table).map_or(0, |t| t.rows.len()))
            .unwrap_or(0)
    }

    /// Open transaction depth.
    pub fn transaction_depth(&self) -> usize {
        self.read().map(|inner| inner.snapshots.len()).unwrap_or(0)
    }

    /// Make every write to `table` fail, to exercise rollback paths.
    pub fn reject_writes(&self, table: &str) {
        if let Ok(mut inner) = self.write() {
            inner.read_only.insert(table.to_owned());
        }
    }

    fn read(&self) -> RepoServiceResult<RwLockReadGuard<'_, Inner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> RepoServiceResult<RwLockWriteGuard<'_, Inner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

impl Inner {
    fn writable(&mut self, table: &str) -> RepoServiceResult<&mut Table> {
        if self.read_only.contains(table) {
            return Err(ApplicationError::Storage {
                reason: format!("table '{table}' rejects writes"),
            }
            .into());
        }
        Ok(self.tables.entry(table.to_owned()).or_default())
    }
}

impl Storage for InMemoryStorage {
    fn begin(&self) -> RepoServiceResult<()> {
        let mut inner = self.write()?;
        let snapshot = inner.tables.clone();
        inner.snapshots.push(snapshot);
        trace!(depth = inner.snapshots.len(), "begin");
        Ok(())
    }

    fn commit(&self) -> RepoServiceResult<()> {
        let mut inner = self.write()?;
        match inner.snapshots.pop() {
            Some(_) => {
                trace!(depth = inner.snapshots.len(), "commit");
                Ok(())
            }
            None => Err(ApplicationError::Storage {
                reason: "commit without an open transaction".into(),
            }
            .into()),
        }
    }

    fn rollback(&self) -> RepoServiceResult<()> {
        let mut inner = self.write()?;
        match inner.snapshots.pop() {
            Some(snapshot) => {
                inner.tables = snapshot;
                debug!(depth = inner.snapshots.len(), "rolled back");
                Ok(())
            }
            None => Err(ApplicationError::Storage {
                reason: "rollback without an open transaction".into(),
            }
            .into()),
        }
    }

    fn select(&self, table: &str, query: &Query) -> RepoServiceResult<Vec<Row>> {
        let inner = self.read()?;
        Ok(inner
            .tables
            .get(table)
            .map(|t| query.evaluate(t.rows()))
            .unwrap_or_default())
    }

    fn count(&self, table: &str, query: &Query) -> RepoServiceResult<usize> {
        let inner = self.read()?;
        Ok(inner
            .tables
            .get(table)
            .map_or(0, |t| t.rows().filter(|row| query.matches(row)).count()))
    }

    fn find(&self, table: &str, id: RecordId) -> RepoServiceResult<Option<Row>> {
        let inner = self.read()?;
        Ok(inner
            .tables
            .get(table)
            .and_then(|t| t.rows.get(&id))
            .map(|attributes| Row::new(id, attributes.clone())))
    }

    fn insert(&self, table: &str, attributes: Attributes) -> RepoServiceResult<RecordId> {
        let mut inner = self.write()?;
        let t = inner.writable(table)?;
        t.last_id += 1;
        let id = t.last_id;
        t.rows.insert(id, attributes);
        trace!(table, id, "insert");
        Ok(id)
    }

    fn update(&self, table: &str, id: RecordId, attributes: Attributes) -> RepoServiceResult<()> {
        let mut inner = self.write()?;
        let t = inner.writable(table)?;
        match t.rows.get_mut(&id) {
            Some(row) => {
                *row = attributes;
                trace!(table, id, "update");
                Ok(())
            }
            None => Err(ApplicationError::RecordNotFound {
                table: table.to_owned(),
                id,
            }
            .into()),
        }
    }

    fn delete(&self, table: &str, id: RecordId) -> RepoServiceResult<bool> {
        let mut inner = self.write()?;
        let removed = inner.writable(table)?.rows.remove(&id).is_some();
        trace!(table, id, removed, "delete");
        Ok(removed)
    }
}
