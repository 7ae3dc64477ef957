use crate::configuration::config::Config;
use crate::controller::command::Command;
use crate::error_handling::types::*;
use crate::record_store::{OperationResult, RecordStore, ResultPayload};
use crate::records::{ItemPatch, NewItem, NewUser, UserPatch};
use crate::storage::file_storage::FileStorage;
use crate::storage::storage_trait::KeyValueStorage;
use log::{debug, error, info};
use serde::Serialize;
use std::sync::Arc;

/// Wires a storage backend to a record store and runs commands against it.
pub struct Controller {
    pub config: Config,
    store: RecordStore,
}

impl Controller {
    /// Opens the file storage selected by `config`, capped by its quota if any.
    pub fn new(config: Config) -> Result<Self, ControllerError> {
        let mut storage = match &config.storage.path {
            Some(path) => FileStorage::new(path),
            None => FileStorage::new_default(),
        }
        .map_err(|e| {
            error!("Unable to open storage: {}", e);
            ControllerError::InitializationFailed(e.to_string())
        })?;
        if let Some(quota) = config.storage.quota_bytes {
            debug!("Storage quota set to {} byte(s)", quota);
            storage = storage.with_quota(quota);
        }
        info!("Controller ready, storage at {}", storage.base_path().display());
        Ok(Self::with_storage(config, Arc::new(storage)))
    }

    pub fn with_storage(config: Config, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            config,
            store: RecordStore::new(storage),
        }
    }

    /// Runs `command` and renders its JSON output.
    ///
    /// Listings render the records themselves; everything else renders an
    /// `OperationResult`. Storage failures are returned as errors.
    pub fn execute(&self, command: Command) -> Result<String, ControllerError> {
        debug!("Executing {:?}", command);
        let store = &self.store;
        match command {
            Command::Users => render(&unwrap_storage(store.list_users())?),
            Command::Register { name, email, password } => {
                outcome(store.register(NewUser { name, email, password }))
            }
            Command::Login { email, password } => outcome(store.login(&email, &password)),
            Command::Whoami => render(&unwrap_storage(store.get_current_user())?),
            Command::UpdateProfile {
                name,
                email,
                password,
                profile_image,
                clear_profile_image,
            } => {
                let profile_image = if clear_profile_image {
                    Some(None)
                } else {
                    profile_image.map(Some)
                };
                let patch = UserPatch { name, email, password, profile_image };
                outcome(store.update_current_user(&patch))
            }
            Command::Logout => outcome(store.logout()),
            Command::Items { all } => {
                let items = if all {
                    store.list_items()
                } else {
                    store.list_items_for_current_user()
                };
                render(&unwrap_storage(items)?)
            }
            Command::Add { item_type, content, status } => {
                outcome(store.create_item(NewItem { item_type, content, status }))
            }
            Command::UpdateItem { id, item_type, content, status } => {
                let patch = ItemPatch { item_type, content, status };
                outcome(store.update_item(id, &patch))
            }
            Command::DeleteItem { id } => outcome(store.delete_item(id)),
        }
    }
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, ControllerError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ControllerError::SerializationFailed(e.to_string()))
}

fn outcome<T: ResultPayload>(result: Result<T, RecordError>) -> Result<String, ControllerError> {
    render(&OperationResult::from_outcome(result)?)
}

// Listings have no business failure; only storage errors can surface.
fn unwrap_storage<T>(result: Result<T, RecordError>) -> Result<T, ControllerError> {
    result.map_err(|e| match e {
        RecordError::Storage(e) => ControllerError::StorageError(e),
        other => ControllerError::RecordError(other),
    })
}
