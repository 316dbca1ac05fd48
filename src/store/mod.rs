//! Record store
//!
//! Each table is persisted as one whole-file JSON snapshot under the
//! database root. Every public operation is atomic with respect to other
//! operations on the same table (via the table lock), not with respect to
//! process crashes.
//!
//! # Invariants Enforced
//!
//! - Ids are unique within a table: next id = max existing id + 1
//! - `id` is never changed by an update
//! - Readers never observe a partially written snapshot

mod database;
mod errors;
mod locks;
mod record;
mod table;

pub use database::Database;
pub use errors::{StoreError, StoreResult};
pub use locks::LockMap;
pub use record::{matches, next_id, record_id, values_equal, Filter, Record, ID_FIELD};
pub use table::{is_valid_table_name, StoreOptions};
