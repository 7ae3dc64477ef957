use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record_id::RecordId;

/// A registered account, as persisted under `todolist_users`.
///
/// The same shape is stored under `todolist_current_user` as the session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    /// Stored as given; no hashing.
    pub password: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    /// Fields this crate does not model, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input of a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Fields to overwrite on the current user. `None` leaves a field untouched.
///
/// `profile_image` is doubly optional: `Some(None)` clears the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_image: Option<Option<String>>,
}

impl UserPatch {
    /// Shallow merge of the present fields over `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password) = &self.password {
            user.password = password.clone();
        }
        if let Some(profile_image) = &self.profile_image {
            user.profile_image = profile_image.clone();
        }
    }
}
