//! Command dispatch for the `todolist` binary.
//!
//! [`Controller`] opens the storage backend named by the configuration and
//! runs one [`Command`] at a time against a [`RecordStore`](crate::record_store::RecordStore),
//! rendering the outcome as JSON.

pub mod command;
pub mod controller_handler;

pub use command::Command;
pub use controller_handler::Controller;
