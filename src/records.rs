//! Record types persisted by the record store.
//!
//! | Struct | Stored under |
//! |--------|--------------|
//! | [`User`] | `todolist_users` (array) and `todolist_current_user` (single object) |
//! | [`Item`] | `todolist_items` (array) |
//!
//! Field names are the JSON names of the persisted documents. Ids are
//! [`RecordId`]s, integers that also accept their string form on read.

pub mod item;
pub mod record_id;
pub mod user;

pub use item::{Item, ItemPatch, ItemType, NewItem, DEFAULT_STATUS};
pub use record_id::RecordId;
pub use user::{NewUser, User, UserPatch};
