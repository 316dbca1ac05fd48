//! Record model and matching rules
//!
//! A record is an ordered JSON object. The reserved `id` field holds a
//! positive integer assigned by the store.

use serde_json::{Map, Value};

/// One schema-less record: ordered field name to JSON value mapping
pub type Record = Map<String, Value>;

/// Exact-match filter: every field must equal its expected value
pub type Filter = Map<String, Value>;

/// Name of the reserved identifier field
pub const ID_FIELD: &str = "id";

/// Returns the record's id, if it holds a non-negative integral number.
///
/// Integral floats such as `1.0` count: hand-edited snapshots may carry them.
pub fn record_id(record: &Record) -> Option<u64> {
    let id = record.get(ID_FIELD)?;
    id.as_u64().or_else(|| {
        let f = id.as_f64()?;
        (f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64).then_some(f as u64)
    })
}

/// Next id for a snapshot: max existing id + 1, or 1 when empty.
///
/// `None` when the highest id is `u64::MAX`.
pub fn next_id(records: &[Record]) -> Option<u64> {
    records
        .iter()
        .filter_map(record_id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
}

/// Returns true when every filter field is present and equal.
///
/// An empty filter matches everything.
pub fn matches(record: &Record, filter: &Filter) -> bool {
    filter.iter().all(|(field, expected)| {
        record
            .get(field)
            .map_or(false, |actual| values_equal(actual, expected))
    })
}

/// Merges `updates` into `record`, never touching `id`.
///
/// Fields absent from `updates` are kept; present ones are overwritten or
/// appended in the order they appear.
pub fn merge(record: &mut Record, updates: Record) {
    for (field, value) in updates {
        if field == ID_FIELD {
            continue;
        }
        record.insert(field, value);
    }
}

/// Equality used by filters.
///
/// Numbers compare by value (`1` equals `1.0`); every other kind only
/// equals the same kind with equal contents.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                match (x.as_f64(), y.as_f64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).map_or(false, |y| values_equal(x, y)))
        }
        _ => a == b,
    }
}
