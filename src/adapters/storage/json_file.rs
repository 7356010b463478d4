//! Per-key file store.
//!
//! Each key maps to one file under the data directory. Values are opaque
//! strings; the holdings store keeps its whole collection as one JSON
//! document under a single key, so a `set` is the one serialized write the
//! engine relies on.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ports::storage::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| StoreError::Write {
            key: data_dir.display().to_string(),
            reason: format!("failed to create data directory: {e}"),
        })?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::storage::HOLDINGS_KEY;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert_eq!(store.get(HOLDINGS_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.set(HOLDINGS_KEY, "[]").unwrap();
        assert_eq!(store.get(HOLDINGS_KEY).unwrap(), Some("[]".to_string()));

        store.set(HOLDINGS_KEY, r#"[{"code":"110011"}]"#).unwrap();
        assert_eq!(
            store.get(HOLDINGS_KEY).unwrap(),
            Some(r#"[{"code":"110011"}]"#.to_string())
        );
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = JsonFileStore::new(&nested).unwrap();

        store.set("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }
}
