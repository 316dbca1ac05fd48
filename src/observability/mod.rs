//! Observability subsystem
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed events
//! - Per-connection counters
//!
//! Observability is read-only: nothing here influences query results.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
