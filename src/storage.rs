//! JSON file persistence for mcstat.
//!
//! Catalogs and registries are stored as pretty-printed JSON under
//! `{storage}/{version}/{language}/`. Writes are atomic via the temp file +
//! rename pattern so a crashed process never leaves a half-written cache.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{McstatError, Result};

/// File-backed JSON store.
///
/// Stateless; every operation takes the full target path. Parent directories
/// are created on save.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl JsonStore {
    /// Create a new store.
    pub fn new() -> Self {
        Self
    }

    /// Check whether a JSON file exists at `path`.
    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Load and deserialize the JSON file at `path`.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path).map_err(|e| McstatError::storage(path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            McstatError::serde(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Serialize `value` and write it to `path` atomically.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| McstatError::storage(parent, e))?;
        }

        let json = serde_json::to_string_pretty(value)?;
        let temp_path = temp_path_for(path);

        // Write to temp file, sync, then rename (atomic on POSIX).
        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| McstatError::storage(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| McstatError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| McstatError::storage(&temp_path, e))?;
        }

        fs::rename(&temp_path, path).map_err(|e| McstatError::storage(path, e))?;

        Ok(())
    }
}

fn temp_path_for(path: &Path) -> std::path::PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("players.json");
        let store = JsonStore::new();

        let mut value = BTreeMap::new();
        value.insert("steve".to_string(), "uuid-1".to_string());

        store.save(&path, &value).unwrap();
        let loaded: BTreeMap<String, String> = store.load(&path).unwrap();

        assert_eq!(loaded, value);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1.19.2").join("en_us").join("terms.json");
        let store = JsonStore::new();

        store.save(&path, &serde_json::json!({"a": 1})).unwrap();

        assert!(store.exists(&path));
    }

    #[test]
    fn test_exists_false_for_missing_and_for_directory() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new();

        assert!(!store.exists(&dir.path().join("missing.json")));
        assert!(!store.exists(dir.path()));
    }

    #[test]
    fn test_load_missing_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new();

        let err = store
            .load::<serde_json::Value>(&dir.path().join("missing.json"))
            .unwrap_err();
        assert!(matches!(err, McstatError::Storage { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_malformed_is_serde_error_naming_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonStore::new().load::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, McstatError::Serde { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_temp_file_cleaned_up_after_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("terms.json");

        JsonStore::new().save(&path, &serde_json::json!([])).unwrap();

        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("terms.json");
        let store = JsonStore::new();

        store.save(&path, &serde_json::json!({"v": 1})).unwrap();
        store.save(&path, &serde_json::json!({"v": 2})).unwrap();

        let loaded: serde_json::Value = store.load(&path).unwrap();
        assert_eq!(loaded["v"], 2);
    }
}
