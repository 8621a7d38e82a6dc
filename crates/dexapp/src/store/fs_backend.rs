use super::KeyValueStore;
use crate::error::{DexError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem key-value store: each slot is `<root>/<key>.json`.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing a slot.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DexError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(DexError::Io)?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.slot_path(key);
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(DexError::Io)?;
        fs::rename(&tmp, target).map_err(DexError::Io)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(DexError::Io)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_slot_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path());
        assert_eq!(store.get("searchHistory").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("data");
        let store = FsStore::new(&root);

        store.set("searchHistory", "[]").unwrap();

        assert!(root.join("searchHistory.json").exists());
        assert_eq!(store.get("searchHistory").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_overwrites_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path());

        store.set("slot", "one").unwrap();
        store.set("slot", "two").unwrap();

        assert_eq!(store.get("slot").unwrap().as_deref(), Some("two"));
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_remove_deletes_file_and_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path());

        store.set("slot", "value").unwrap();
        store.remove("slot").unwrap();
        assert!(!store.slot_path("slot").exists());

        // Second removal is a no-op
        store.remove("slot").unwrap();
    }
}
