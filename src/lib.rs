//! jsonql - a lightweight, file-backed JSON record store with a SQL-like
//! query interface
//!
//! ```no_run
//! let db = jsonql::connect("demo_db")?;
//! db.query("INSERT INTO devices (name, room) VALUES ('Epson L710U', 'A101')")?;
//! let rows = db.query("SELECT * FROM devices WHERE room = 'A101'")?;
//! println!("{}", rows.to_json());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod connection;
pub mod observability;
pub mod query;
pub mod store;

pub use connection::{connect, Connection};
pub use query::{QueryEngine, QueryError, QueryOutput, Status};
pub use store::{Database, Filter, Record, StoreError, StoreOptions};
