//! Per-table lock map
//!
//! One exclusive lock per table name, created on first use and kept until
//! the map is cleared. The map itself is guarded by a separate coarse lock
//! that is only held while looking up or inserting an entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Locks guarding `()`: a panic while held leaves nothing to repair, so a
/// poisoned lock is simply taken over.
pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Table name to exclusive lock
#[derive(Debug, Default)]
pub struct LockMap {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `table`, creating it on first access.
    pub fn table_lock(&self, table: &str) -> Arc<Mutex<()>> {
        let mut locks = lock_unpoisoned(&self.locks);
        Arc::clone(
            locks
                .entry(table.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Drops every entry.
    pub fn clear(&self) {
        lock_unpoisoned(&self.locks).clear();
    }

    /// Number of tables that currently have a lock
    pub fn len(&self) -> usize {
        lock_unpoisoned(&self.locks).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_same_table_shares_one_lock() {
        let map = LockMap::new();
        let a = map.table_lock("users");
        let b = map.table_lock("users");
        let c = map.table_lock("devices");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_clear_empties_map() {
        let map = LockMap::new();
        map.table_lock("users");
        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let map = Arc::new(LockMap::new());
        let lock = map.table_lock("users");

        let poisoner = Arc::clone(&lock);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join();

        assert!(lock.is_poisoned());
        let _guard = lock_unpoisoned(&lock);
    }
}
