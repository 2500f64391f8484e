pub mod health;
pub mod todos;

pub use health::{backend_test, health_check};
pub use todos::{create_todo, delete_todo, list_todos, update_todo};
