pub mod query;
pub mod todo;

pub use query::{TodoFilter, TodoStats};
pub use todo::{NewTodoRequest, Priority, Todo, UpdateTodoRequest, DEFAULT_CATEGORY};
