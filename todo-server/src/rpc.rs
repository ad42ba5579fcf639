//! Typed dispatch layer: each remote procedure is mounted under its own name,
//! queries as GET and mutations as POST.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use todo_core::{CreateTodoInput, Healthcheck, MarkTodoCompletedInput, Todo};

use crate::db::Db;
use crate::error::AppError;
use crate::handlers;

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/createTodo", post(create_todo))
        .route("/getTodos", get(get_todos))
        .route("/markTodoCompleted", post(mark_todo_completed))
        .with_state(db)
}

async fn healthcheck() -> Json<Healthcheck> {
    Json(Healthcheck {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodoInput>,
) -> Result<Json<Todo>, AppError> {
    let todo = handlers::create_todo(&db, input).await?;
    Ok(Json(todo))
}

async fn get_todos(State(db): State<Db>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = handlers::get_todos(&db).await?;
    Ok(Json(todos))
}

async fn mark_todo_completed(
    State(db): State<Db>,
    Json(input): Json<MarkTodoCompletedInput>,
) -> Result<Json<Todo>, AppError> {
    let todo = handlers::mark_todo_completed(&db, input).await?;
    Ok(Json(todo))
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
