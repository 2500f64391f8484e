//! Data-access contract for todos.
//!
//! Each handler maps onto exactly one call here. Failures come back as
//! [`StoreError`] values carrying the store's own message; nothing is retried.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use service_core::error::AppError;
use thiserror::Error;

use crate::models::{NewTodo, Todo, TodoChanges};

/// Server error codes reported for rejected documents: document validation
/// failure and duplicate key.
const CONSTRAINT_CODES: [i32; 2] = [121, 11000];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Todo not found")]
    NotFound,

    #[error("{0}")]
    Constraint(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Database(String),
}

impl StoreError {
    fn classify(kind: &ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(..)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Unavailable(message),
            ErrorKind::Write(WriteFailure::WriteError(e)) if CONSTRAINT_CODES.contains(&e.code) => {
                StoreError::Constraint(message)
            }
            ErrorKind::Command(e) if CONSTRAINT_CODES.contains(&e.code) => {
                StoreError::Constraint(message)
            }
            _ => StoreError::Database(message),
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        let message = err.to_string();
        StoreError::classify(&err.kind, message)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound(anyhow::anyhow!("Todo not found")),
            StoreError::Constraint(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            StoreError::Unavailable(msg) => AppError::ServiceUnavailable(anyhow::anyhow!(msg)),
            StoreError::Database(msg) => AppError::DatabaseError(anyhow::anyhow!(msg)),
        }
    }
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Inserts a new todo; the store assigns its id.
    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError>;

    /// Every todo in the store's natural order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Returns the post-update document, or `NotFound`.
    async fn update(&self, id: ObjectId, changes: TodoChanges) -> Result<Todo, StoreError>;

    /// Removes the todo if present. Absent ids are not an error.
    async fn delete(&self, id: ObjectId) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
