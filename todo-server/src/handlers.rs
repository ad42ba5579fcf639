//! Business logic behind the remote procedures. Each handler composes
//! validation with one persistence accessor call; the database handle is
//! passed in explicitly so tests can run against their own pool.

use todo_core::{CreateTodoInput, MarkTodoCompletedInput, Todo};

use crate::db::Db;
use crate::error::AppResult;

pub async fn create_todo(db: &Db, input: CreateTodoInput) -> AppResult<Todo> {
    let new_todo = input.validate()?;
    db.insert_todo(&new_todo).await
}

pub async fn get_todos(db: &Db) -> AppResult<Vec<Todo>> {
    db.list_todos().await
}

pub async fn mark_todo_completed(db: &Db, input: MarkTodoCompletedInput) -> AppResult<Todo> {
    db.set_todo_completed(input.id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::error::AppError;

    async fn test_db() -> Db {
        // One connection, or every pooled connection would get its own
        // private in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        Db::new(pool)
    }

    fn input(title: &str, description: Option<&str>) -> CreateTodoInput {
        CreateTodoInput {
            title: title.to_string(),
            description: description.map(String::from),
        }
    }

    #[tokio::test]
    async fn creates_todo_with_title_and_description() {
        let db = test_db().await;

        let before = Utc::now();
        let todo = create_todo(&db, input("Test Todo", Some("A todo for testing")))
            .await
            .unwrap();
        let after = Utc::now();

        assert_eq!(todo.title, "Test Todo");
        assert_eq!(todo.description.as_deref(), Some("A todo for testing"));
        assert!(!todo.completed);
        assert!(todo.created_at >= before && todo.created_at <= after);
    }

    #[tokio::test]
    async fn missing_description_is_stored_as_null() {
        let db = test_db().await;

        let todo = create_todo(&db, input("Todo without description", None))
            .await
            .unwrap();

        assert_eq!(todo.description, None);
    }

    #[tokio::test]
    async fn empty_description_is_stored_as_null() {
        let db = test_db().await;

        let todo = create_todo(&db, input("Todo with empty description", Some("")))
            .await
            .unwrap();

        assert_eq!(todo.description, None);
    }

    #[tokio::test]
    async fn rejects_empty_title() {
        let db = test_db().await;

        let err = create_todo(&db, input("", None)).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(get_todos(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let db = test_db().await;

        assert_eq!(get_todos(&db).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let db = test_db().await;

        create_todo(&db, input("First Todo", None)).await.unwrap();
        create_todo(&db, input("Second Todo", None)).await.unwrap();

        let todos = get_todos(&db).await.unwrap();

        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title, "Second Todo");
        assert_eq!(todos[1].title, "First Todo");
        assert!(todos[0].created_at >= todos[1].created_at);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let db = test_db().await;

        let err = mark_todo_completed(&db, MarkTodoCompletedInput { id: 42 })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(42)));
        assert!(err.to_string().contains("42"));
    }

    #[tokio::test]
    async fn completion_is_idempotent() {
        let db = test_db().await;

        let todo = create_todo(&db, input("Test Todo", None)).await.unwrap();

        let first = mark_todo_completed(&db, MarkTodoCompletedInput { id: todo.id })
            .await
            .unwrap();
        assert!(first.completed);

        let second = mark_todo_completed(&db, MarkTodoCompletedInput { id: todo.id })
            .await
            .unwrap();
        assert!(second.completed);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn create_complete_list_scenario() {
        let db = test_db().await;

        let created = create_todo(&db, input("Buy milk", None)).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.description, None);
        assert!(!created.completed);

        let completed = mark_todo_completed(&db, MarkTodoCompletedInput { id: 1 })
            .await
            .unwrap();
        assert_eq!(completed.id, 1);
        assert!(completed.completed);

        let todos = get_todos(&db).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert!(todos[0].completed);
    }
}
