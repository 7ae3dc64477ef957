pub mod configuration;
pub use configuration::{CliArgs, Config};

pub mod controller;
pub use controller::{Command, Controller};

pub mod error_handling;
pub use error_handling::{ConfigError, ControllerError, RecordError, StorageError};

pub mod record_store;
pub use record_store::{IdGenerator, OperationResult, RecordStore};

pub mod records;
pub use records::{Item, ItemPatch, ItemType, NewItem, NewUser, RecordId, User, UserPatch};

pub mod storage;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageKey};
