//! File-based store with atomic writes.
//!
//! Each key lives in its own file under `dirs::data_dir()/<namespace>/`,
//! named after the SHA-256 of the key. Writes go to a temp file and are
//! renamed into place.

use crate::store::TokenStore;
use crate::GateError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk representation of one slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct SlotRecord {
    key: String,
    value: String,
}

/// File-based store.
#[derive(Debug)]
pub struct FileStore {
    /// Directory for slot files.
    store_dir: PathBuf,
}

impl FileStore {
    /// Create a new file store with the given namespace.
    ///
    /// Slot files are stored under `dirs::data_dir()/<namespace>/`.
    pub fn new(namespace: &str) -> Result<Self, GateError> {
        let base_dir = dirs::data_dir()
            .ok_or_else(|| GateError::StoreIO("Could not find data directory".to_string()))?;

        Self::with_path(base_dir.join(namespace))
    }

    /// Create a file store rooted at a specific directory.
    pub fn with_path(store_dir: PathBuf) -> Result<Self, GateError> {
        fs::create_dir_all(&store_dir)
            .map_err(|e| GateError::StoreIO(format!("Failed to create store dir: {}", e)))?;
        Ok(Self { store_dir })
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.store_dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.store_dir.join(format!("{}.json", hash_key(key)))
    }
}

impl TokenStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, GateError> {
        let path = self.slot_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .map_err(|e| GateError::StoreIO(format!("Failed to read slot file: {}", e)))?;

        // A hand-edited or truncated file is handed back verbatim so the
        // gate rejects it as malformed and purges the slot.
        match serde_json::from_str::<SlotRecord>(&json) {
            Ok(record) if record.key == key => Ok(Some(record.value)),
            Ok(_) => {
                tracing::warn!(path = %path.display(), "slot file key mismatch");
                Ok(Some(json))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable slot file");
                Ok(Some(json))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GateError> {
        let target_path = self.slot_path(key);
        let temp_path = target_path.with_extension("tmp");

        let record = SlotRecord {
            key: key.to_string(),
            value: value.to_string(),
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| GateError::StoreIO(format!("Failed to serialize slot: {}", e)))?;

        fs::write(&temp_path, &json)
            .map_err(|e| GateError::StoreIO(format!("Failed to write temp file: {}", e)))?;

        fs::rename(&temp_path, &target_path)
            .map_err(|e| GateError::StoreIO(format!("Failed to rename slot file: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), GateError> {
        let path = self.slot_path(key);

        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| GateError::StoreIO(format!("Failed to delete slot: {}", e)))?;
        }

        Ok(())
    }
}

/// SHA-256 hex of a storage key, used as the slot file name.
pub fn hash_key(key: &str) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::with_path(dir.path().join("slots")).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_slot_reads_none() {
        let (_dir, store) = store();
        assert_eq!(store.get("onboarding_token_v1").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let (_dir, store) = store();
        store.set("onboarding_token_v1", "123_abc").unwrap();
        assert_eq!(
            store.get("onboarding_token_v1").unwrap(),
            Some("123_abc".to_string())
        );
    }

    #[test]
    fn set_overwrites_and_leaves_no_temp_file() {
        let (_dir, store) = store();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("second".to_string()));

        let temp_files = fs::read_dir(store.dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .count();
        assert_eq!(temp_files, 0);
    }

    #[test]
    fn remove_is_idempotent() {
        let (_dir, store) = store();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert!(store.remove("k").is_ok());
    }

    #[test]
    fn survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slots");
        FileStore::with_path(path.clone()).unwrap().set("k", "v").unwrap();

        let reopened = FileStore::with_path(path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn corrupted_file_reads_raw_contents() {
        let (_dir, store) = store();
        fs::write(store.slot_path("k"), "{not json").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("{not json".to_string()));
    }

    #[test]
    fn foreign_key_record_reads_raw_contents() {
        let (_dir, store) = store();
        let json = r#"{"key":"other","value":"123_abc"}"#;
        fs::write(store.slot_path("k"), json).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json.to_string()));
    }

    #[test]
    fn hash_key_is_hex_sha256() {
        let hash = hash_key("onboarding_token_v1");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
