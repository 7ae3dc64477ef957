//! Key/Value Storage Trait
//!
//! This module defines the `KeyValueStorage` trait, the contract of the string-keyed
//! substrate the record store persists its collections through.
//!
//! Implementors of this trait are responsible for:
//! - Returning the last value written under a key, or `None` when absent
//! - Replacing the whole value of a key on write
//! - Removing a key (a no-op when the key is absent)
//!
//! Values are opaque strings; the record store puts JSON documents in them.
//! All methods return a `Result` to handle potential storage errors.

use crate::error_handling::types::StorageError;

/// The `KeyValueStorage` trait defines the interface for persistent string key/value backends.
///
/// It mirrors the browser local-storage contract: whole values are read and
/// written, there is no partial update and no cross-key transaction.
pub trait KeyValueStorage: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// - `key` - The key to look up.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key` from the backend. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
