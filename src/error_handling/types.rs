use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    DirectoryDoesNotExist(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::DirectoryDoesNotExist(e) => write!(f, "Directory error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

/// Failures of the key/value substrate itself.
///
/// These are never business outcomes: callers treat them as fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    ReadFailed,
    WriteFailed,
    InvalidKey(String),
    QuotaExceeded { key: String, limit: usize },
    Corrupted { key: String, reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed => write!(f, "Storage read failed"),
            StorageError::WriteFailed => write!(f, "Storage write failed"),
            StorageError::InvalidKey(key) => write!(f, "Invalid storage key: {:?}", key),
            StorageError::QuotaExceeded { key, limit } => {
                write!(f, "Storage quota of {} bytes exceeded writing {}", limit, key)
            }
            StorageError::Corrupted { key, reason } => {
                write!(f, "Stored value under {} is malformed: {}", key, reason)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Outcomes of a record store operation that did not succeed.
///
/// Every variant except `Storage` is an expected business condition whose
/// `Display` text is shown to the user as is.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    DuplicateEmail,
    InvalidCredentials,
    NotLoggedIn,
    UserNotFound,
    EmailTaken,
    ItemNotFound,
    Storage(StorageError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::DuplicateEmail => write!(f, "Email already registered!"),
            RecordError::InvalidCredentials => write!(f, "Invalid email or password!"),
            RecordError::NotLoggedIn => write!(f, "Not logged in"),
            RecordError::UserNotFound => write!(f, "User not found"),
            RecordError::EmailTaken => write!(f, "Email already taken!"),
            RecordError::ItemNotFound => write!(f, "Item not found"),
            RecordError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<StorageError> for RecordError {
    fn from(err: StorageError) -> Self {
        RecordError::Storage(err)
    }
}

#[derive(Debug)]
pub enum ControllerError {
    ConfigurationError(ConfigError),
    StorageError(StorageError),
    RecordError(RecordError),
    SerializationFailed(String),
    InitializationFailed(String),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::ConfigurationError(e) => write!(f, "Configuration error: {}", e),
            ControllerError::StorageError(e) => write!(f, "Storage error: {}", e),
            ControllerError::RecordError(e) => write!(f, "Operation failed: {}", e),
            ControllerError::SerializationFailed(e) => write!(f, "Serialization failed: {}", e),
            ControllerError::InitializationFailed(e) => write!(f, "Initialization failed: {}", e),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<ConfigError> for ControllerError {
    fn from(err: ConfigError) -> Self {
        ControllerError::ConfigurationError(err)
    }
}

impl From<StorageError> for ControllerError {
    fn from(err: StorageError) -> Self {
        ControllerError::StorageError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_messages() {
        assert_eq!(RecordError::DuplicateEmail.to_string(), "Email already registered!");
        assert_eq!(RecordError::InvalidCredentials.to_string(), "Invalid email or password!");
        assert_eq!(RecordError::NotLoggedIn.to_string(), "Not logged in");
        assert_eq!(RecordError::UserNotFound.to_string(), "User not found");
        assert_eq!(RecordError::EmailTaken.to_string(), "Email already taken!");
        assert_eq!(RecordError::ItemNotFound.to_string(), "Item not found");
    }

    #[test]
    fn test_storage_error_converts() {
        let err: RecordError = StorageError::WriteFailed.into();
        assert_eq!(err, RecordError::Storage(StorageError::WriteFailed));
        assert_eq!(err.to_string(), "Storage error: Storage write failed");
    }
}
