//! JSON key-value file store.
//!
//! `get(key) -> JSON or absent` / `set(key, JSON)` over one file per key.
//! Reads never fail: a missing, unreadable, or malformed document is
//! treated as the type's default (the caller sees an empty list or `None`),
//! with a warning logged. Writes go through a staging file and rename so a
//! crash mid-write cannot leave a truncated document behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One JSON document per string key, stored as `<root>/<key>.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read the document stored under `key`.
    ///
    /// Absent or malformed documents degrade to `T::default()`.
    pub fn read<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.document_path(key);
        let raw = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored document, using default");
                return T::default();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed stored JSON, treating as empty");
                T::default()
            }
        }
    }

    /// Replace the document stored under `key`.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let staging = self.root.join(format!(".{key}.staging"));
        fs::write(&staging, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&staging, self.document_path(key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (FileStore, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path().join("data")).unwrap();
        (store, tmp)
    }

    #[test]
    fn absent_key_reads_as_default() {
        let (store, _tmp) = temp_store();
        let list: Vec<String> = store.read("missing");
        assert!(list.is_empty());
        let single: Option<String> = store.read("missing");
        assert!(single.is_none());
    }

    #[test]
    fn write_then_read_roundtrips() {
        let (store, _tmp) = temp_store();
        store.write("names", &vec!["a".to_string(), "b".to_string()]).unwrap();
        let back: Vec<String> = store.read("names");
        assert_eq!(back, vec!["a", "b"]);
    }

    #[test]
    fn malformed_json_reads_as_default() {
        let (store, _tmp) = temp_store();
        fs::write(store.root().join("broken.json"), b"{not json").unwrap();
        let list: Vec<String> = store.read("broken");
        assert!(list.is_empty());
    }

    #[test]
    fn write_replaces_previous_document() {
        let (store, _tmp) = temp_store();
        store.write("n", &1u32).unwrap();
        store.write("n", &2u32).unwrap();
        let n: u32 = store.read("n");
        assert_eq!(n, 2);
    }

    #[test]
    fn no_staging_file_left_behind() {
        let (store, _tmp) = temp_store();
        store.write("n", &1u32).unwrap();
        assert!(!store.root().join(".n.staging").exists());
    }
}
