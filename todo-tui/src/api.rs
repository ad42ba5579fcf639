use anyhow::{Result, anyhow};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use todo_core::{CreateTodoInput, Healthcheck, MarkTodoCompletedInput, Todo};

/// HTTP client for the RPC server. Procedure names double as paths.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn healthcheck(&self) -> Result<Healthcheck> {
        let response = self
            .http
            .get(format!("{}/healthcheck", self.base_url))
            .send()
            .await?;
        parse(response).await
    }

    pub async fn get_todos(&self) -> Result<Vec<Todo>> {
        let response = self
            .http
            .get(format!("{}/getTodos", self.base_url))
            .send()
            .await?;
        parse(response).await
    }

    pub async fn create_todo(&self, input: &CreateTodoInput) -> Result<Todo> {
        let response = self
            .http
            .post(format!("{}/createTodo", self.base_url))
            .json(input)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn mark_todo_completed(&self, id: i64) -> Result<Todo> {
        let response = self
            .http
            .post(format!("{}/markTodoCompleted", self.base_url))
            .json(&MarkTodoCompletedInput { id })
            .send()
            .await?;
        parse(response).await
    }
}

async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        Err(anyhow!(message))
    }
}
