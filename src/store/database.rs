//! Database: a directory of table snapshots plus the locks that serialize
//! writers.
//!
//! # Concurrency
//!
//! - Writers (insert, update, delete, create/drop table) hold the table's
//!   exclusive lock for the whole load-modify-save cycle.
//! - `select` takes no table lock; snapshots are published by rename, so it
//!   observes a complete snapshot from before or after a concurrent write.
//! - Every operation holds the database gate shared; `drop_database` holds
//!   it exclusively so it never overlaps another operation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{StoreError, StoreResult};
use super::locks::{lock_unpoisoned, LockMap};
use super::record::{self, Filter, Record, ID_FIELD};
use super::table::{self, StoreOptions, TABLE_EXTENSION};
use crate::observability::{Event, Logger};

/// File-backed record store rooted at one directory
#[derive(Debug)]
pub struct Database {
    root: PathBuf,
    options: StoreOptions,
    locks: LockMap,
    gate: RwLock<()>,
}

impl Database {
    /// Opens the database at `root` with default options, creating the
    /// directory (and parents) if missing.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(root, StoreOptions::default())
    }

    /// Opens the database at `root` with explicit write options.
    pub fn open_with(root: impl AsRef<Path>, options: StoreOptions) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            StoreError::io(format!("creating database directory {}", root.display()), e)
        })?;

        Logger::info(
            Event::DatabaseOpened,
            &[("path", &root.display().to_string())],
        );

        Ok(Self {
            root,
            options,
            locks: LockMap::new(),
            gate: RwLock::new(()),
        })
    }

    /// Returns the database root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Returns the write options in effect.
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.gate.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an empty table if none exists. Existing data is untouched.
    pub fn create_table(&self, name: &str) -> StoreResult<()> {
        let path = table::table_path(&self.root, name)?;
        let _gate = self.shared();
        let lock = self.locks.table_lock(name);
        let _guard = lock_unpoisoned(&lock);

        if !path.exists() {
            table::save(&path, name, &[], self.options)?;
            Logger::info(Event::TableCreated, &[("table", name)]);
        }
        Ok(())
    }

    /// Removes a table. Dropping a missing table is a no-op.
    pub fn drop_table(&self, name: &str) -> StoreResult<()> {
        let path = table::table_path(&self.root, name)?;
        let _gate = self.shared();
        let lock = self.locks.table_lock(name);
        let _guard = lock_unpoisoned(&lock);

        if table::remove(&path, name)? {
            Logger::info(Event::TableDropped, &[("table", name)]);
        }
        Ok(())
    }

    /// Returns whether a snapshot file exists for `name`.
    pub fn table_exists(&self, name: &str) -> bool {
        let _gate = self.shared();
        table::table_path(&self.root, name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Lists table names in lexicographic order.
    pub fn list_tables(&self) -> StoreResult<Vec<String>> {
        let _gate = self.shared();
        let entries = fs::read_dir(&self.root).map_err(|e| {
            StoreError::io(format!("listing {}", self.root.display()), e)
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| StoreError::io(format!("listing {}", self.root.display()), e))?;
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(TABLE_EXTENSION)
            {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) if table::is_valid_table_name(stem) => names.push(stem.to_string()),
                _ => {}
            }
        }
        names.sort();
        Ok(names)
    }

    /// Appends `record` with a fresh id and returns that id.
    ///
    /// Creates the table if it does not exist. Any client-supplied `id` is
    /// overwritten.
    pub fn insert(&self, name: &str, mut record: Record) -> StoreResult<u64> {
        let path = table::table_path(&self.root, name)?;
        let _gate = self.shared();
        let lock = self.locks.table_lock(name);
        let _guard = lock_unpoisoned(&lock);

        let created = !path.exists();
        let mut rows = table::load(&path, name)?;
        let new_id = record::next_id(&rows)
            .ok_or_else(|| StoreError::corrupted(name, "id space exhausted"))?;
        record.insert(ID_FIELD.to_string(), new_id.into());
        rows.push(record);
        table::save(&path, name, &rows, self.options)?;

        if created {
            Logger::info(Event::TableCreated, &[("table", name)]);
        }
        Logger::trace(
            Event::RecordInserted,
            &[("table", name), ("id", &new_id.to_string())],
        );
        Ok(new_id)
    }

    /// Returns records in on-disk order, optionally restricted to those
    /// matching every field of `filter`. A missing table yields no rows.
    pub fn select(&self, name: &str, filter: Option<&Filter>) -> StoreResult<Vec<Record>> {
        let path = table::table_path(&self.root, name)?;
        let _gate = self.shared();

        let rows = table::load(&path, name)?;
        Ok(match filter {
            None => rows,
            Some(filter) => rows
                .into_iter()
                .filter(|row| record::matches(row, filter))
                .collect(),
        })
    }

    /// Number of records in a table; 0 when it does not exist.
    pub fn count(&self, name: &str) -> StoreResult<usize> {
        let path = table::table_path(&self.root, name)?;
        let _gate = self.shared();
        Ok(table::load(&path, name)?.len())
    }

    /// Merges `updates` into the first record with the given id.
    ///
    /// `id` in `updates` is ignored. Returns whether a record was found.
    pub fn update(&self, name: &str, id: u64, updates: Record) -> StoreResult<bool> {
        let path = table::table_path(&self.root, name)?;
        let _gate = self.shared();
        let lock = self.locks.table_lock(name);
        let _guard = lock_unpoisoned(&lock);

        let mut rows = table::load(&path, name)?;
        let Some(row) = rows.iter_mut().find(|row| record::record_id(row) == Some(id)) else {
            return Ok(false);
        };
        record::merge(row, updates);
        table::save(&path, name, &rows, self.options)?;

        Logger::trace(
            Event::RecordUpdated,
            &[("table", name), ("id", &id.to_string())],
        );
        Ok(true)
    }

    /// Removes every record with the given id. Returns whether any was
    /// removed; the snapshot is only rewritten when something changed.
    pub fn delete(&self, name: &str, id: u64) -> StoreResult<bool> {
        let path = table::table_path(&self.root, name)?;
        let _gate = self.shared();
        let lock = self.locks.table_lock(name);
        let _guard = lock_unpoisoned(&lock);

        let mut rows = table::load(&path, name)?;
        let before = rows.len();
        rows.retain(|row| record::record_id(row) != Some(id));
        if rows.len() == before {
            return Ok(false);
        }
        table::save(&path, name, &rows, self.options)?;

        Logger::trace(
            Event::RecordDeleted,
            &[
                ("table", name),
                ("id", &id.to_string()),
                ("removed", &(before - rows.len()).to_string()),
            ],
        );
        Ok(true)
    }

    /// Deletes every table by removing the root directory, then recreates
    /// it empty and forgets all table locks. Irreversible.
    pub fn drop_database(&self) -> StoreResult<()> {
        let _gate = self.exclusive();

        match fs::remove_dir_all(&self.root) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(StoreError::io(
                    format!("removing database directory {}", self.root.display()),
                    e,
                ))
            }
        }
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::io(
                format!("recreating database directory {}", self.root.display()),
                e,
            )
        })?;
        self.locks.clear();

        Logger::warn(
            Event::DatabaseDropped,
            &[("path", &self.root.display().to_string())],
        );
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn lock_count(&self) -> usize {
        self.locks.len()
    }
}
