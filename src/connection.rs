//! Connection handle
//!
//! `connect` composes a `Database` and a `QueryEngine` that shares it. The
//! handle is cheap to clone and can be moved across threads.

use std::path::Path;
use std::sync::Arc;

use crate::observability::{MetricsRegistry, MetricsSnapshot};
use crate::query::{QueryEngine, QueryOutput, QueryResult};
use crate::store::{Database, Filter, Record, StoreOptions, StoreResult};

/// Opens (creating if needed) the database at `path` with default options.
pub fn connect(path: impl AsRef<Path>) -> StoreResult<Connection> {
    Connection::open(path, StoreOptions::default())
}

/// A database plus the query engine bound to it
#[derive(Debug, Clone)]
pub struct Connection {
    db: Arc<Database>,
    engine: QueryEngine,
}

impl Connection {
    /// Opens the database at `path` with explicit write options.
    pub fn open(path: impl AsRef<Path>, options: StoreOptions) -> StoreResult<Self> {
        let db = Arc::new(Database::open_with(path, options)?);
        let engine = QueryEngine::with_metrics(Arc::clone(&db), Arc::new(MetricsRegistry::new()));
        Ok(Self { db, engine })
    }

    /// Runs one textual statement.
    pub fn query(&self, text: &str) -> QueryResult<QueryOutput> {
        self.engine.query(text)
    }

    pub fn insert(&self, table: &str, record: Record) -> StoreResult<u64> {
        let id = self.db.insert(table, record)?;
        self.engine.metrics().increment_inserted();
        Ok(id)
    }

    pub fn select(&self, table: &str, filter: Option<&Filter>) -> StoreResult<Vec<Record>> {
        self.db.select(table, filter)
    }

    pub fn update(&self, table: &str, id: u64, updates: Record) -> StoreResult<bool> {
        let found = self.db.update(table, id, updates)?;
        if found {
            self.engine.metrics().add_updated(1);
        }
        Ok(found)
    }

    pub fn delete(&self, table: &str, id: u64) -> StoreResult<bool> {
        let removed = self.db.delete(table, id)?;
        if removed {
            self.engine.metrics().add_deleted(1);
        }
        Ok(removed)
    }

    pub fn create_table(&self, table: &str) -> StoreResult<()> {
        self.db.create_table(table)
    }

    pub fn drop_table(&self, table: &str) -> StoreResult<()> {
        self.db.drop_table(table)
    }

    /// Removes every table. Irreversible.
    pub fn drop_database(&self) -> StoreResult<()> {
        self.db.drop_database()
    }

    pub fn list_tables(&self) -> StoreResult<Vec<String>> {
        self.db.list_tables()
    }

    pub fn table_exists(&self, table: &str) -> bool {
        self.db.table_exists(table)
    }

    pub fn count(&self, table: &str) -> StoreResult<usize> {
        self.db.count(table)
    }

    /// The underlying record store
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// The query engine bound to this connection
    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub fn path(&self) -> &Path {
        self.db.path()
    }

    /// Counters accumulated since this connection was opened
    pub fn metrics(&self) -> MetricsSnapshot {
        self.engine.metrics().snapshot()
    }
}
