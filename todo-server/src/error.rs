use todo_core::ValidationError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Todo with id {0} not found")]
    NotFound(i64),
    #[error("database error")]
    Database(#[from] sqlx::Error),
}
