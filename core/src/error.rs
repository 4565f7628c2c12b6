//! Error types for the todo store.
//!
//! # Design
//! Every failure is a rejected operation: the store is left unchanged and the
//! caller gets a distinguishable kind plus a human-readable message. The HTTP
//! layer maps the kind to a status code and echoes the message.

use thiserror::Error;

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A field was empty, malformed, or not one of the accepted values.
    #[error("{0}")]
    InvalidInput(String),

    /// An item with the same task (ignoring case) already exists.
    #[error("{0}")]
    Conflict(String),

    /// No item matches the requested task.
    #[error("{0}")]
    NotFound(String),
}

/// Fieldless discriminant of `StoreError`, for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Conflict,
    NotFound,
}

impl StoreError {
    pub(crate) fn empty_task() -> Self {
        StoreError::InvalidInput("task cannot be empty".to_string())
    }

    pub(crate) fn invalid_priority(value: &str) -> Self {
        StoreError::InvalidInput(format!("invalid priority: {value}"))
    }

    pub(crate) fn invalid_status(value: &str) -> Self {
        StoreError::InvalidInput(format!("invalid status: {value}"))
    }

    pub(crate) fn duplicate() -> Self {
        StoreError::Conflict("todo item already exists".to_string())
    }

    pub(crate) fn not_found() -> Self {
        StoreError::NotFound("todo item not found".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::InvalidInput(_) => ErrorKind::InvalidInput,
            StoreError::Conflict(_) => ErrorKind::Conflict,
            StoreError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}
