use std::path::PathBuf;

use serde::Deserialize;

/// `[storage]` table of the configuration file.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding the JSON documents. Falls back to
    /// `TODOLIST_STORAGE_DIR`, then the current directory.
    pub path: Option<PathBuf>,
    /// Cap on the total bytes of stored keys and values. Unlimited when unset.
    pub quota_bytes: Option<usize>,
}
