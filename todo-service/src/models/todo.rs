use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A stored todo document in the `todos` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Todo {
    pub fn new(new: NewTodo) -> Self {
        Self {
            id: ObjectId::new(),
            title: new.title,
            description: new.description,
        }
    }

    /// Applies the provided fields in place; omitted fields keep their value.
    pub fn apply(&mut self, changes: TodoChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
}

/// Fields to overwrite on update. `description: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo() -> Todo {
        Todo::new(NewTodo {
            title: "Buy milk".to_string(),
            description: Some("2%".to_string()),
        })
    }

    #[test]
    fn apply_only_touches_provided_fields() {
        let mut todo = todo();
        todo.apply(TodoChanges {
            title: Some("New".to_string()),
            description: None,
        });
        assert_eq!(todo.title, "New");
        assert_eq!(todo.description.as_deref(), Some("2%"));
    }

    #[test]
    fn apply_can_clear_description() {
        let mut todo = todo();
        todo.apply(TodoChanges {
            title: None,
            description: Some(None),
        });
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, None);
    }

    #[test]
    fn missing_description_is_stored_as_null() {
        let todo = Todo::new(NewTodo {
            title: "t".to_string(),
            description: None,
        });
        let doc = mongodb::bson::to_document(&todo).expect("serialize");
        assert_eq!(doc.get("description"), Some(&mongodb::bson::Bson::Null));
        assert_eq!(doc.get_object_id("_id").expect("_id"), todo.id);
    }
}
