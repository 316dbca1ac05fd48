//! Metrics registry
//!
//! - Counters only, monotonic
//! - Reset only when the owning connection is created
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one connection.
///
/// Relaxed ordering is enough: counters are independent and only read for
/// reporting.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    queries_executed: AtomicU64,
    queries_rejected: AtomicU64,
    records_inserted: AtomicU64,
    records_updated: AtomicU64,
    records_deleted: AtomicU64,
}

/// Point-in-time copy of every counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub records_inserted: u64,
    pub records_updated: u64,
    pub records_deleted: u64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment queries executed
    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment queries rejected
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_inserted(&self) {
        self.records_inserted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_updated(&self, rows: u64) {
        self.records_updated.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn add_deleted(&self, rows: u64) {
        self.records_deleted.fetch_add(rows, Ordering::Relaxed);
    }

    /// Get current values of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            records_inserted: self.records_inserted.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = MetricsRegistry::new();
        let snap = metrics.snapshot();
        assert_eq!(snap.queries_executed, 0);
        assert_eq!(snap.records_deleted, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = MetricsRegistry::new();
        metrics.increment_queries_executed();
        metrics.increment_queries_executed();
        metrics.increment_queries_rejected();
        metrics.increment_inserted();
        metrics.add_updated(3);
        metrics.add_deleted(2);

        let snap = metrics.snapshot();
        assert_eq!(snap.queries_executed, 2);
        assert_eq!(snap.queries_rejected, 1);
        assert_eq!(snap.records_inserted, 1);
        assert_eq!(snap.records_updated, 3);
        assert_eq!(snap.records_deleted, 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = MetricsRegistry::new();
        metrics.increment_inserted();
        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["records_inserted"], 1);
    }
}
