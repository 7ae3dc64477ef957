use std::fmt;

/// The three fixed keys the record store persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Users,
    CurrentUser,
    Items,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Users => "todolist_users",
            StorageKey::CurrentUser => "todolist_current_user",
            StorageKey::Items => "todolist_items",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `key` is usable as a storage key by every backend.
///
/// Keys double as file names in `FileStorage`, so only ASCII alphanumerics,
/// `_` and `-` are accepted.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
