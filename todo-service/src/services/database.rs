use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Client as MongoClient, Collection, Database,
};

use super::store::{StoreError, TodoStore};
use crate::models::{NewTodo, Todo, TodoChanges};

pub const TODOS_COLLECTION: &str = "todos";

#[derive(Clone)]
pub struct MongoTodoStore {
    client: MongoClient,
    db: Database,
}

impl MongoTodoStore {
    /// Builds the client. The driver connects lazily, so an unreachable
    /// server only surfaces on the first operation or [`TodoStore::ping`].
    pub async fn connect(uri: &str, fallback_database: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            StoreError::from(e)
        })?;

        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(fallback_database));
        tracing::info!(database = %db.name(), "MongoDB client ready");

        Ok(Self { client, db })
    }

    pub fn todos(&self) -> Collection<Todo> {
        self.db.collection(TODOS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn set_document(changes: TodoChanges) -> Document {
    let mut set = Document::new();
    if let Some(title) = changes.title {
        set.insert("title", title);
    }
    if let Some(description) = changes.description {
        set.insert(
            "description",
            description.map(Bson::String).unwrap_or(Bson::Null),
        );
    }
    set
}

#[async_trait]
impl TodoStore for MongoTodoStore {
    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let todo = Todo::new(new);
        self.todos().insert_one(&todo, None).await?;
        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let cursor = self.todos().find(doc! {}, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(&self, id: ObjectId, changes: TodoChanges) -> Result<Todo, StoreError> {
        let filter = doc! { "_id": id };

        // $set with no fields is rejected by the server
        if changes.is_empty() {
            return self
                .todos()
                .find_one(filter, None)
                .await?
                .ok_or(StoreError::NotFound);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.todos()
            .find_one_and_update(filter, doc! { "$set": set_document(changes) }, options)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), StoreError> {
        let removed = self
            .todos()
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?;
        if removed.is_none() {
            tracing::debug!(todo_id = %id, "Delete matched no todo");
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::from(e)
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_document_only_contains_provided_fields() {
        let set = set_document(TodoChanges {
            title: Some("New".to_string()),
            description: None,
        });
        assert_eq!(set, doc! { "title": "New" });
    }

    #[test]
    fn set_document_writes_null_to_clear_description() {
        let set = set_document(TodoChanges {
            title: None,
            description: Some(None),
        });
        assert_eq!(set, doc! { "description": Bson::Null });
    }
}
