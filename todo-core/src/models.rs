use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted task record. `id` and `created_at` are assigned by the store
/// on insert and never change afterwards; `completed` only ever goes from
/// false to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Raw input for the `createTodo` procedure, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for the `markTodoCompleted` procedure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkTodoCompletedInput {
    pub id: i64,
}

/// Response of the `healthcheck` procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Healthcheck {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
