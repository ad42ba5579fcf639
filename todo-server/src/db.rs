use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use todo_core::{NewTodo, Todo};

use crate::error::{AppError, AppResult};

/// Data-access boundary around the `todos` table. The pool is opened once at
/// startup and shared; `Db` is cheap to clone.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePool::connect(database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Db { pool })
    }

    pub fn new(pool: SqlitePool) -> Self {
        Db { pool }
    }

    /// Appends a new row. `id` comes from the autoincrement key and
    /// `created_at` is bound here so every stored timestamp carries the same
    /// format and sub-second precision.
    pub async fn insert_todo(&self, todo: &NewTodo) -> AppResult<Todo> {
        let row = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title, description, completed, created_at)
             VALUES (?, ?, FALSE, ?)
             RETURNING id, title, description, completed, created_at",
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Every row, newest first. Ties on `created_at` keep insertion order.
    pub async fn list_todos(&self) -> AppResult<Vec<Todo>> {
        let rows = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, completed, created_at
             FROM todos ORDER BY created_at DESC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Sets `completed` for the matching row. Already-completed rows succeed
    /// unchanged; a missing row is `NotFound`. The single UPDATE statement is
    /// the only concurrency boundary, so racing completions both succeed.
    pub async fn set_todo_completed(&self, id: i64) -> AppResult<Todo> {
        sqlx::query_as::<_, Todo>(
            "UPDATE todos SET completed = TRUE WHERE id = ?
             RETURNING id, title, description, completed, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound(id))
    }
}
