//! Embedded document store
//!
//! A single untyped table of JSON objects, persisted as one JSON array on
//! disk. Heterogeneous record shapes share the table and are told apart by
//! a `type` discriminator field (see [`record`]). The in-memory backend
//! exists for tests and never touches the filesystem.

pub mod record;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A JSON object as stored in the table.
pub type StoredRecord = Map<String, Value>;

/// Embedded single-table document store.
pub struct Store {
    path: Option<PathBuf>,
    records: Vec<StoredRecord>,
}

impl Store {
    /// Open a file-backed store, loading any existing records.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let records = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read store file {:?}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("store file {:?} is not a JSON record array", path))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path: Some(path),
            records,
        })
    }

    /// Open a store that lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: Vec::new(),
        }
    }

    /// Append a record and persist the table.
    ///
    /// The record only joins the in-memory table once the write succeeds,
    /// so a failed insert cannot leak into a later persist.
    pub fn insert(&mut self, record: StoredRecord) -> Result<()> {
        self.records.push(record);
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Records matching a predicate, in insertion order.
    pub fn search<F>(&self, predicate: F) -> Vec<&StoredRecord>
    where
        F: Fn(&StoredRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// All records, in insertion order.
    pub fn all(&self) -> &[StoredRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<()> {
        if let Some(path) = &self.path {
            let content = serde_json::to_string_pretty(&self.records)?;
            fs::write(path, content)
                .with_context(|| format!("failed to write store file {:?}", path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn obj(value: Value) -> StoredRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_in_memory_insert_and_search() {
        let mut store = Store::in_memory();
        store.insert(obj(json!({"type": "contact", "name": "A"}))).unwrap();
        store.insert(obj(json!({"type": "comment", "name": "B"}))).unwrap();

        let contacts = store.search(|r| r.get("type") == Some(&json!("contact")));
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].get("name"), Some(&json!("A")));
    }

    #[test]
    fn test_search_preserves_insertion_order() {
        let mut store = Store::in_memory();
        for i in 0..3 {
            store.insert(obj(json!({"type": "comment", "n": i}))).unwrap();
        }
        let found = store.search(|_| true);
        let order: Vec<_> = found.iter().map(|r| r.get("n").cloned().unwrap()).collect();
        assert_eq!(order, vec![json!(0), json!(1), json!(2)]);
    }

    #[test]
    fn test_file_backend_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");

        let mut store = Store::open(&path).unwrap();
        store.insert(obj(json!({"type": "contact", "name": "A"}))).unwrap();
        drop(store);

        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.all()[0].get("name"), Some(&json!("A")));
    }

    #[test]
    fn test_failed_insert_leaves_table_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("db.json");

        let mut store = Store::open(&path).unwrap();
        assert!(store.insert(obj(json!({"type": "contact", "name": "A"}))).is_err());
        assert!(store.is_empty());

        // Once the directory exists, a later insert must not resurrect
        // the record that failed to persist.
        fs::create_dir(dir.path().join("missing-dir")).unwrap();
        store.insert(obj(json!({"type": "contact", "name": "B"}))).unwrap();
        assert_eq!(store.len(), 1);

        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.all()[0].get("name"), Some(&json!("B")));
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("db.json")).unwrap();
        assert!(store.is_empty());
    }
}
