use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{debug, error, warn};

use crate::error_handling::types::StorageError;
use crate::storage::storage_trait::KeyValueStorage;
use crate::storage::types::is_valid_key;

/// In-memory KeyValueStorage for tests and ephemeral runs.
///
/// An optional quota caps the total size (key + value bytes) of everything
/// stored, the way browser local storage does.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently stored, counting keys and values.
    pub fn used_bytes(&self) -> Result<usize, StorageError> {
        let entries = self.entries.lock().map_err(|_| {
            error!("MemoryStorage lock poisoned");
            StorageError::ReadFailed
        })?;
        Ok(entries.iter().map(|(k, v)| k.len() + v.len()).sum())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        let entries = self.entries.lock().map_err(|_| {
            error!("MemoryStorage lock poisoned reading {}", key);
            StorageError::ReadFailed
        })?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| {
            error!("MemoryStorage lock poisoned writing {}", key);
            StorageError::WriteFailed
        })?;
        if let Some(limit) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > limit {
                warn!("Quota of {} byte(s) exceeded writing {}", limit, key);
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        debug!("Stored {} byte(s) under {}", value.len(), key);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| {
            error!("MemoryStorage lock poisoned removing {}", key);
            StorageError::WriteFailed
        })?;
        if entries.remove(key).is_some() {
            debug!("Removed {}", key);
        }
        Ok(())
    }
}

fn check_key(key: &str) -> Result<(), StorageError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        error!("Rejected storage key {:?}", key);
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), Some("v2".to_string()));

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        // absent key
        storage.remove_item("k").unwrap();
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set_item("shared", "yes").unwrap();
        assert_eq!(other.get_item("shared").unwrap(), Some("yes".to_string()));
    }

    #[test]
    fn test_quota_exceeded_keeps_previous_value() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345").unwrap();
        assert_eq!(storage.used_bytes().unwrap(), 6);

        let err = storage.set_item("k", "1234567890").unwrap_err();
        assert_eq!(err, StorageError::QuotaExceeded { key: "k".into(), limit: 10 });
        assert_eq!(storage.get_item("k").unwrap(), Some("12345".to_string()));

        // replacing a value only counts the new value once
        storage.set_item("k", "123456789").unwrap();
    }

    #[test]
    fn test_invalid_key_rejected() {
        let storage = MemoryStorage::new();
        assert_eq!(
            storage.set_item("a/b", "v").unwrap_err(),
            StorageError::InvalidKey("a/b".into())
        );
        assert_eq!(
            storage.get_item("../k").unwrap_err(),
            StorageError::InvalidKey("../k".into())
        );
        assert_eq!(storage.remove_item("").unwrap_err(), StorageError::InvalidKey("".into()));
    }
}
