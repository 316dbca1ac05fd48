//! Table snapshot files
//!
//! Each table is one `<name>.json` file holding a JSON array of records.
//! Snapshots are published by writing a hidden temp file in the same
//! directory and renaming it over the table file, so a reader that does not
//! hold the table lock still sees either the old or the new snapshot.

use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::record::Record;
use crate::observability::{Event, Logger};

/// File extension for table snapshots
pub const TABLE_EXTENSION: &str = "json";

/// How snapshots are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Indent table files so they diff cleanly
    pub pretty: bool,
    /// fsync the temp file before it replaces the table file
    pub sync_writes: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            sync_writes: false,
        }
    }
}

/// Returns whether `name` can be used as a table name.
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolves the snapshot path for a table under `root`.
pub fn table_path(root: &Path, name: &str) -> StoreResult<PathBuf> {
    if !is_valid_table_name(name) {
        return Err(StoreError::InvalidTableName(name.to_string()));
    }
    Ok(root.join(format!("{}.{}", name, TABLE_EXTENSION)))
}

/// Loads a snapshot. A missing file is an empty table.
pub fn load(path: &Path, table: &str) -> StoreResult<Vec<Record>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StoreError::io(
                format!("reading table '{}'", table),
                e,
            ))
        }
    };

    serde_json::from_slice(&bytes).map_err(|e| {
        Logger::error(
            Event::SnapshotCorrupted,
            &[("table", table), ("reason", &e.to_string())],
        );
        StoreError::corrupted(table, e.to_string())
    })
}

/// Writes a full snapshot and atomically replaces the table file.
pub fn save(path: &Path, table: &str, records: &[Record], options: StoreOptions) -> StoreResult<()> {
    let temp_path = temp_path_for(path, table);

    if let Err(e) = write_temp(&temp_path, records, options) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::io(format!("writing table '{}'", table), e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StoreError::io(format!("publishing snapshot of table '{}'", table), e)
    })
}

/// Removes a table file. Returns whether a file was removed.
pub fn remove(path: &Path, table: &str) -> StoreResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::io(format!("removing table '{}'", table), e)),
    }
}

// Hidden and not ending in `.json`, so never listed as a table. The random
// suffix keeps two processes writing the same table from sharing a temp file.
fn temp_path_for(path: &Path, table: &str) -> PathBuf {
    let file_name = format!(".{}.{}.tmp", table, Uuid::new_v4().simple());
    match path.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn write_temp(temp_path: &Path, records: &[Record], options: StoreOptions) -> io::Result<()> {
    let file = File::create(temp_path)?;
    let mut writer = BufWriter::new(file);

    if options.pretty {
        serde_json::to_writer_pretty(&mut writer, records)?;
    } else {
        serde_json::to_writer(&mut writer, records)?;
    }
    writer.flush()?;

    if options.sync_writes {
        writer.get_ref().sync_all()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> Vec<Record> {
        vec![
            json!({"name": "Epson L710U", "room": "A101", "id": 1})
                .as_object()
                .unwrap()
                .clone(),
        ]
    }

    #[test]
    fn test_table_name_validation() {
        assert!(is_valid_table_name("devices"));
        assert!(is_valid_table_name("room_2"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("../etc"));
        assert!(!is_valid_table_name("a b"));
        assert!(!is_valid_table_name("a.json"));

        let temp = TempDir::new().unwrap();
        assert!(matches!(
            table_path(temp.path(), "x/y"),
            Err(StoreError::InvalidTableName(_))
        ));
        assert_eq!(
            table_path(temp.path(), "users").unwrap(),
            temp.path().join("users.json")
        );
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let rows = load(&temp.path().join("none.json"), "none").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_field_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("devices.json");

        save(&path, "devices", &sample(), StoreOptions::default()).unwrap();
        let rows = load(&path, "devices").unwrap();

        assert_eq!(rows, sample());
        let keys: Vec<_> = rows[0].keys().cloned().collect();
        assert_eq!(keys, vec!["name", "room", "id"]);
    }

    #[test]
    fn test_pretty_option_controls_layout() {
        let temp = TempDir::new().unwrap();
        let pretty = temp.path().join("p.json");
        let compact = temp.path().join("c.json");

        save(&pretty, "p", &sample(), StoreOptions::default()).unwrap();
        save(
            &compact,
            "c",
            &sample(),
            StoreOptions {
                pretty: false,
                sync_writes: true,
            },
        )
        .unwrap();

        assert!(fs::read_to_string(&pretty).unwrap().contains("\n  "));
        assert!(!fs::read_to_string(&compact).unwrap().contains('\n'));
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.json");
        save(&path, "t", &sample(), StoreOptions::default()).unwrap();
        save(&path, "t", &[], StoreOptions::default()).unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["t.json"]);
    }

    #[test]
    fn test_malformed_content_is_corruption() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, b"{not json").unwrap();
        assert!(matches!(
            load(&path, "bad"),
            Err(StoreError::Corrupted { .. })
        ));

        fs::write(&path, b"[1, 2, 3]").unwrap();
        assert!(matches!(
            load(&path, "bad"),
            Err(StoreError::Corrupted { .. })
        ));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("t.json");
        save(&path, "t", &[], StoreOptions::default()).unwrap();

        assert!(remove(&path, "t").unwrap());
        assert!(!remove(&path, "t").unwrap());
    }
}
