use super::backend::KeyValueStore;
use crate::error::{FolioError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const STORAGE_FILE: &str = "storage.json";
const CORRUPT_FILE: &str = "storage.json.corrupt";

/// File-backed key-value store.
///
/// The whole store is one JSON object in `<root>/storage.json`. Every write
/// re-reads the map, applies the change and replaces the file through a temp
/// file + rename, so a crash never leaves a half-written store behind.
///
/// Reads report an unparseable store as an error. Writes move it aside to
/// `storage.json.corrupt` and start over from an empty map.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root.join(STORAGE_FILE)
    }

    pub fn corrupt_path(&self) -> PathBuf {
        self.root.join(CORRUPT_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FolioError::Io)?;
        }
        Ok(())
    }

    fn load_map(&self) -> Result<BTreeMap<String, String>> {
        let path = self.storage_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path).map_err(FolioError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let map = serde_json::from_str(&content).map_err(FolioError::Serialization)?;
        Ok(map)
    }

    fn load_map_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.load_map() {
            Err(FolioError::Serialization(e)) => {
                let quarantine = self.corrupt_path();
                tracing::warn!(
                    path = %quarantine.display(),
                    error = %e,
                    "store unreadable, moving it aside"
                );
                fs::rename(self.storage_path(), &quarantine).map_err(FolioError::Io)?;
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, key: &str, map: &BTreeMap<String, String>) -> Result<()> {
        let write_err = |reason: String| FolioError::PersistenceWrite {
            key: key.to_string(),
            reason,
        };

        self.ensure_dir().map_err(|e| write_err(e.to_string()))?;
        let content = serde_json::to_string_pretty(map).map_err(FolioError::Serialization)?;

        let tmp_file = self.root.join(format!(".storage-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(|e| write_err(e.to_string()))?;
        if let Err(e) = fs::rename(&tmp_file, self.storage_path()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(write_err(e.to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for FsBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(key, &map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.load_map_for_write()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(key, &map)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load_map()?.into_keys().collect())
    }
}
