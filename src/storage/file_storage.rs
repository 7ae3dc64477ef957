use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::error_handling::types::StorageError;
use crate::storage::storage_trait::KeyValueStorage;
use crate::storage::types::is_valid_key;

/// Environment variable selecting the directory used by [`FileStorage::new_default`].
pub const STORAGE_DIR_ENV: &str = "TODOLIST_STORAGE_DIR";

/// Filesystem-backed KeyValueStorage.
///
/// Each key is kept in its own file:
///
/// ```text
/// <base_path>/
/// ├── todolist_users.json
/// ├── todolist_current_user.json
/// └── todolist_items.json
/// ```
///
/// With a quota set, a write is refused when the stored keys and values
/// (file stems and file sizes) would exceed it, as with [`MemoryStorage`].
///
/// [`MemoryStorage`]: crate::storage::memory_storage::MemoryStorage
#[derive(Clone, Debug)]
pub struct FileStorage {
    base_path: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| {
            error!("Failed to create storage dir {}: {}", base_path.display(), e);
            StorageError::WriteFailed
        })?;
        info!("FileStorage initialized at {}", base_path.display());
        Ok(Self {
            base_path,
            quota_bytes: None,
        })
    }

    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    /// Construct FileStorage using env var TODOLIST_STORAGE_DIR if set, otherwise current directory.
    pub fn new_default() -> Result<Self, StorageError> {
        if let Ok(dir) = std::env::var(STORAGE_DIR_ENV) {
            info!("Using FileStorage from {}: {}", STORAGE_DIR_ENV, dir);
            return Self::new(PathBuf::from(dir));
        }
        let cwd = std::env::current_dir().map_err(|e| {
            error!("Failed to get current dir: {}", e);
            StorageError::ReadFailed
        })?;
        info!("Using FileStorage at current directory: {}", cwd.display());
        Self::new(cwd)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(key) {
            error!("Rejected storage key {:?}", key);
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    /// Bytes held by every stored key other than `skip`.
    fn used_bytes_except(&self, skip: &str) -> Result<usize, StorageError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            error!("Failed to list {}: {}", self.base_path.display(), e);
            StorageError::ReadFailed
        })?;
        let mut total = 0;
        for entry in entries {
            let entry = entry.map_err(|e| {
                error!("Failed to list {}: {}", self.base_path.display(), e);
                StorageError::ReadFailed
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let stem = match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) if stem != skip && is_valid_key(stem) => stem,
                _ => continue,
            };
            let size = entry.metadata().map_err(|e| {
                error!("Failed to stat {}: {}", path.display(), e);
                StorageError::ReadFailed
            })?;
            total += stem.len() + size.len() as usize;
        }
        Ok(total)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Read {} byte(s) from {}", content.len(), path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Read failed {}: {}", path.display(), e);
                Err(StorageError::ReadFailed)
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        if let Some(limit) = self.quota_bytes {
            if self.used_bytes_except(key)? + key.len() + value.len() > limit {
                warn!("Quota of {} byte(s) exceeded writing {}", limit, key);
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }
        fs::write(&path, value).map_err(|e| {
            error!("Write failed {}: {}", path.display(), e);
            StorageError::WriteFailed
        })?;
        debug!("Wrote {} byte(s) to {}", value.len(), path.display());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Remove failed {}: {}", path.display(), e);
                Err(StorageError::WriteFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get_item() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert_eq!(storage.get_item("todolist_users").unwrap(), None);

        storage.set_item("todolist_users", "[]").unwrap();
        assert_eq!(storage.get_item("todolist_users").unwrap(), Some("[]".to_string()));
        assert!(dir.path().join("todolist_users.json").exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.set_item("todolist_items", r#"[{"id":1}]"#).unwrap();

        let reopened = FileStorage::new(dir.path()).unwrap();
        assert_eq!(
            reopened.get_item("todolist_items").unwrap(),
            Some(r#"[{"id":1}]"#.to_string())
        );
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.set_item("todolist_current_user", "{}").unwrap();
        storage.remove_item("todolist_current_user").unwrap();
        storage.remove_item("todolist_current_user").unwrap();
        assert_eq!(storage.get_item("todolist_current_user").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert!(matches!(
            storage.set_item("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.get_item("a/b"), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_creates_missing_base_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(&nested).unwrap();
        storage.set_item("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn test_quota_counts_every_stored_key() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap().with_quota(12);
        storage.set_item("a", "12345").unwrap();
        storage.set_item("b", "1234").unwrap();

        let err = storage.set_item("c", "12").unwrap_err();
        assert_eq!(err, StorageError::QuotaExceeded { key: "c".into(), limit: 12 });
        assert!(!dir.path().join("c.json").exists());

        // rewriting a key does not count its old value
        storage.set_item("a", "123456").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), Some("123456".to_string()));
    }

    #[test]
    #[serial]
    fn test_new_default_uses_env_dir() {
        let dir = TempDir::new().unwrap();
        std::env::set_var(STORAGE_DIR_ENV, dir.path());
        let storage = FileStorage::new_default();
        std::env::remove_var(STORAGE_DIR_ENV);

        let storage = storage.unwrap();
        assert_eq!(storage.base_path(), dir.path());
    }
}
