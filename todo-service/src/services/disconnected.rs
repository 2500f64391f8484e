use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::store::{StoreError, TodoStore};
use crate::models::{NewTodo, Todo, TodoChanges};

/// Stands in for the database when no client could be built at startup, so
/// the process keeps serving and each store call fails with the reason.
pub struct DisconnectedStore {
    reason: String,
}

impl DisconnectedStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}

#[async_trait]
impl TodoStore for DisconnectedStore {
    async fn create(&self, _new: NewTodo) -> Result<Todo, StoreError> {
        self.unavailable()
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        self.unavailable()
    }

    async fn update(&self, _id: ObjectId, _changes: TodoChanges) -> Result<Todo, StoreError> {
        self.unavailable()
    }

    async fn delete(&self, _id: ObjectId) -> Result<(), StoreError> {
        self.unavailable()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.unavailable()
    }
}
