use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Map;

use crate::error_handling::types::{RecordError, StorageError};
use crate::record_store::id_generator::IdGenerator;
use crate::records::{Item, ItemPatch, NewItem, NewUser, RecordId, User, UserPatch};
use crate::storage::storage_trait::KeyValueStorage;
use crate::storage::types::StorageKey;

/// Typed CRUD over the users, session and items collections.
///
/// Every mutation reads the whole collection, changes it in memory and writes
/// it back under its key. Nothing is cached between calls, so the storage
/// backend is always the source of truth.
///
/// # Fields Overview
/// - `storage`: the key/value substrate, shared with whoever else holds the `Arc`
/// - `ids`: issues ids for new users and items
pub struct RecordStore {
    storage: Arc<dyn KeyValueStorage>,
    ids: IdGenerator,
}

impl RecordStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_id_generator(storage, IdGenerator::new())
    }

    pub fn with_id_generator(storage: Arc<dyn KeyValueStorage>, ids: IdGenerator) -> Self {
        Self { storage, ids }
    }

    fn read_document<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let raw = match self.storage.get_item(key.as_str())? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(None),
        };
        serde_json::from_str::<Option<T>>(&raw).map_err(|e| {
            error!("Malformed JSON under {}: {}", key, e);
            StorageError::Corrupted {
                key: key.as_str().to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn write_document<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|e| {
            error!("Failed to encode {}: {}", key, e);
            StorageError::WriteFailed
        })?;
        self.storage.set_item(key.as_str(), &raw)
    }

    fn read_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.read_document(StorageKey::Users)?.unwrap_or_default())
    }

    fn read_items(&self) -> Result<Vec<Item>, StorageError> {
        Ok(self.read_document(StorageKey::Items)?.unwrap_or_default())
    }

    fn read_session(&self) -> Result<Option<User>, StorageError> {
        self.read_document(StorageKey::CurrentUser)
    }

    // --- Users and session ---

    /// All registered users in insertion order.
    pub fn list_users(&self) -> Result<Vec<User>, RecordError> {
        Ok(self.read_users()?)
    }

    /// Registers a new user and logs them in.
    ///
    /// Fails with `DuplicateEmail` when the email is already registered
    /// (exact, case-sensitive match).
    pub fn register(&self, new_user: NewUser) -> Result<User, RecordError> {
        let mut users = self.read_users()?;
        if users.iter().any(|u| u.email == new_user.email) {
            debug!("Registration rejected, {} already registered", new_user.email);
            return Err(RecordError::DuplicateEmail);
        }

        let id = self.ids.next_id(users.iter().map(|u| u.id).max());
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            profile_image: None,
            extra: Map::new(),
        };
        users.push(user.clone());
        self.write_document(StorageKey::Users, &users)?;
        info!("Registered user {}", id);

        self.login(&user.email, &user.password)
    }

    /// Makes the first user with exactly this email and password the current user.
    pub fn login(&self, email: &str, password: &str) -> Result<User, RecordError> {
        let users = self.read_users()?;
        match users.into_iter().find(|u| u.email == email && u.password == password) {
            Some(user) => {
                self.write_document(StorageKey::CurrentUser, &user)?;
                info!("User {} logged in", user.id);
                Ok(user)
            }
            None => {
                debug!("Login failed for {}", email);
                Err(RecordError::InvalidCredentials)
            }
        }
    }

    /// The session snapshot, or `None` when logged out.
    pub fn get_current_user(&self) -> Result<Option<User>, RecordError> {
        Ok(self.read_session()?)
    }

    /// Merges `patch` over the current user's record and refreshes the session.
    ///
    /// A new email is rejected with `EmailTaken` when it differs from the
    /// session's email and some user already has it.
    pub fn update_current_user(&self, patch: &UserPatch) -> Result<User, RecordError> {
        let current = self.read_session()?.ok_or(RecordError::NotLoggedIn)?;
        let mut users = self.read_users()?;
        let index = users
            .iter()
            .position(|u| u.id == current.id)
            .ok_or_else(|| {
                debug!("Session user {} no longer in users", current.id);
                RecordError::UserNotFound
            })?;

        // Compared with the session copy, which may lag behind the stored record.
        if let Some(email) = patch.email.as_ref().filter(|e| !e.is_empty()) {
            if *email != current.email && users.iter().any(|u| u.email == *email) {
                debug!("Email {} already taken", email);
                return Err(RecordError::EmailTaken);
            }
        }

        patch.apply_to(&mut users[index]);
        let updated = users[index].clone();
        self.write_document(StorageKey::Users, &users)?;
        self.write_document(StorageKey::CurrentUser, &updated)?;
        info!("Updated user {}", updated.id);
        Ok(updated)
    }

    /// Clears the session. Succeeds when already logged out.
    pub fn logout(&self) -> Result<(), RecordError> {
        self.storage.remove_item(StorageKey::CurrentUser.as_str())?;
        info!("Logged out");
        Ok(())
    }

    // --- Items ---

    /// Items of every user, in insertion order.
    pub fn list_items(&self) -> Result<Vec<Item>, RecordError> {
        Ok(self.read_items()?)
    }

    pub fn list_items_for_current_user(&self) -> Result<Vec<Item>, RecordError> {
        let Some(user) = self.read_session()? else {
            return Ok(Vec::new());
        };
        let mut items = self.read_items()?;
        items.retain(|item| item.user_id == user.id);
        Ok(items)
    }

    /// Creates an item owned by the current user.
    pub fn create_item(&self, new_item: NewItem) -> Result<Item, RecordError> {
        let user = self.read_session()?.ok_or(RecordError::NotLoggedIn)?;
        let mut items = self.read_items()?;

        let item = Item {
            id: self.ids.next_id(items.iter().map(|i| i.id).max()),
            user_id: user.id,
            item_type: new_item.item_type,
            status: new_item.effective_status(),
            content: new_item.content,
            created_at: Utc::now().trunc_subsecs(3),
            extra: Map::new(),
        };
        items.push(item.clone());
        self.write_document(StorageKey::Items, &items)?;
        info!("Created {} {} for user {}", item.item_type, item.id, user.id);
        Ok(item)
    }

    pub fn update_item(&self, item_id: RecordId, patch: &ItemPatch) -> Result<Item, RecordError> {
        let mut items = self.read_items()?;
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(RecordError::ItemNotFound)?;
        patch.apply_to(item);
        let updated = item.clone();
        self.write_document(StorageKey::Items, &items)?;
        info!("Updated item {}", item_id);
        Ok(updated)
    }

    /// Removes every item with `item_id`. Missing ids are not an error.
    pub fn delete_item(&self, item_id: RecordId) -> Result<(), RecordError> {
        let mut items = self.read_items()?;
        let before = items.len();
        items.retain(|i| i.id != item_id);
        self.write_document(StorageKey::Items, &items)?;
        debug!("Deleted {} item(s) with id {}", before - items.len(), item_id);
        Ok(())
    }
}
