use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::store::{StoreError, TodoStore};
use crate::models::{NewTodo, Todo, TodoChanges};

/// Process-local store kept in insertion order. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        if new.title.is_empty() {
            return Err(StoreError::Constraint(
                "Todo validation failed: title is required".into(),
            ));
        }
        let todo = Todo::new(new);
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.read().await.clone())
    }

    async fn update(&self, id: ObjectId, changes: TodoChanges) -> Result<Todo, StoreError> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound)?;
        todo.apply(changes);
        Ok(todo.clone())
    }

    async fn delete(&self, id: ObjectId) -> Result<(), StoreError> {
        self.todos.write().await.retain(|todo| todo.id != id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
