pub mod models;
pub mod validation;

pub use models::{CreateTodoInput, Healthcheck, MarkTodoCompletedInput, Todo};
pub use validation::{NewTodo, ValidationError};
