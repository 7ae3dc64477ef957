//! Record store subsystem.
//!
//! This module exposes the facade the presentation layer talks to. A
//! [`RecordStore`] is constructed once over an injected
//! [`KeyValueStorage`](crate::storage::KeyValueStorage) and offers typed
//! operations over three JSON collections:
//!
//! | Key | Contents |
//! |-----|----------|
//! | `todolist_users` | every registered [`User`](crate::records::User) |
//! | `todolist_current_user` | snapshot of the logged-in user, absent when logged out |
//! | `todolist_items` | every [`Item`](crate::records::Item) of every user |
//!
//! Re-exports:
//! - [`RecordStore`]: the facade.
//! - [`IdGenerator`]: monotonic id source used for new records.
//! - [`OperationResult`]: serializable `{success, error}` view of an outcome.
//!
//! Example:
//! ```
//! use std::sync::Arc;
//! use todolist::record_store::RecordStore;
//! use todolist::records::{ItemType, NewItem, NewUser};
//! use todolist::storage::MemoryStorage;
//!
//! let store = RecordStore::new(Arc::new(MemoryStorage::new()));
//! store.register(NewUser {
//!     name: "A".into(),
//!     email: "a@x.com".into(),
//!     password: "p".into(),
//! })?;
//! let item = store.create_item(NewItem::new(ItemType::Task, "buy milk"))?;
//! assert_eq!(item.status, "pending");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod facade;
pub mod id_generator;
pub mod operation_result;

pub use facade::RecordStore;
pub use id_generator::IdGenerator;
pub use operation_result::{OperationResult, ResultPayload};
