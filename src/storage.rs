//! Storage subsystem
//!
//! This module provides the key/value substrate the record store persists
//! its collections through.
//!
//! Components:
//! - `storage_trait`: the KeyValueStorage trait defining a uniform API.
//! - `types`: the fixed storage keys and key validation.
//! - `memory_storage`: in-memory implementation with an optional quota, used by tests.
//! - `file_storage`: filesystem-backed implementation, one JSON file per key.

pub mod file_storage;
pub mod memory_storage;
pub mod storage_trait;
pub mod types;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use storage_trait::KeyValueStorage;
pub use types::StorageKey;
