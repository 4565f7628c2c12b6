//! In-memory todo store.
//!
//! # Overview
//! `TodoStore` holds the authoritative list of todo items and guarantees
//! validated, consistent mutation and read access under concurrent use.
//! It performs no I/O; the HTTP layer lives in the `todo-server` crate.
//!
//! # Design
//! - One store instance is created explicitly and its handle is cloned into
//!   whatever needs it. There is no global instance.
//! - Status and priority are enums parsed once at each entry point.
//! - Every rejected operation leaves the store unchanged and returns a
//!   `StoreError` carrying its kind and a message.

pub mod error;
pub mod store;
pub mod types;

pub use error::{ErrorKind, StoreError};
pub use store::TodoStore;
pub use types::{Priority, Status, TodoItem};
