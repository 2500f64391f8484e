pub mod database;
pub mod disconnected;
pub mod memory;
pub mod store;

pub use database::MongoTodoStore;
pub use disconnected::DisconnectedStore;
pub use memory::MemoryTodoStore;
pub use store::{StoreError, TodoStore};
