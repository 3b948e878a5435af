//! Key/value persistence capability
//!
//! Two backends: an in-memory map (tests, ephemeral sessions) and a JSON
//! file on disk.

use crate::{FavoritesError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// String-keyed, string-valued persistent storage
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Must be durable when it returns `Ok`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend. Clones share the same map, which lets tests model
/// "the process restarted but storage survived".
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| FavoritesError::Backend("memory store poisoned".to_string()))
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// A JSON object on disk, one member per key
#[derive(Debug, Clone)]
pub struct JsonFileKv {
    path: PathBuf,
}

impl JsonFileKv {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Entries to build the next write on. An unparsable file is moved
    /// aside to `<name>.corrupt` and replaced rather than blocking writes.
    fn read_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.read_all() {
            Err(FavoritesError::Serialization(e)) => {
                let backup = self.path.with_extension("json.corrupt");
                std::fs::rename(&self.path, &backup)?;
                tracing::warn!(
                    "Unreadable store {} moved to {}: {}",
                    self.path.display(),
                    backup.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;

        // Write to temp file first, then rename (atomic)
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KvStore for JsonFileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_for_write()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_clones_share_entries() {
        let mut a = MemoryKv::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
        a.remove("k").unwrap();
        assert!(b.get("k").unwrap().is_none());
    }

    #[test]
    fn test_json_file_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("kv.json");

        let mut kv = JsonFileKv::at_path(&path);
        assert!(kv.get("missing").unwrap().is_none());
        kv.set("a", "1").unwrap();
        kv.set("b", "[\"x\"]").unwrap();

        let reopened = JsonFileKv::at_path(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("[\"x\"]"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_json_file_corrupt_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.json");
        std::fs::write(&path, "{ not json").unwrap();

        let kv = JsonFileKv::at_path(&path);
        assert!(matches!(kv.get("a"), Err(FavoritesError::Serialization(_))));
    }

    #[test]
    fn test_json_file_corrupt_is_replaced_on_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut kv = JsonFileKv::at_path(&path);
        kv.set("a", "1").unwrap();

        assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
        let backup = path.with_extension("json.corrupt");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ not json");
    }
}
