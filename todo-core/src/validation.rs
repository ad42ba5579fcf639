use thiserror::Error;

use crate::models::CreateTodoInput;

pub const MAX_TITLE_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title: Title is required")]
    TitleRequired,
    #[error("title: Title too long (max {MAX_TITLE_LEN} characters)")]
    TitleTooLong,
}

/// A create input that passed validation, with its description normalized:
/// an empty or missing description is `None`, never `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
}

impl CreateTodoInput {
    pub fn validate(self) -> Result<NewTodo, ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TitleTooLong);
        }

        let description = self.description.filter(|d| !d.is_empty());

        Ok(NewTodo {
            title: self.title,
            description,
        })
    }
}
