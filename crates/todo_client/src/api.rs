use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::types::{NewTodo, Todo, TodoPatch};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("todo not found")]
    NotFound,
    #[error("unexpected status {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("request failed")]
    Transport(#[source] reqwest::Error),
    #[error("invalid response body")]
    Decode(#[source] reqwest::Error),
}

/// The four operations the session needs from the service.
#[async_trait]
pub trait TodoBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ApiError>;
    async fn create(&self, todo: &NewTodo) -> Result<Todo, ApiError>;
    async fn update(&self, id: Uuid, patch: &TodoPatch) -> Result<Todo, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for `{base_url}/todos`.
#[derive(Debug, Clone)]
pub struct TodoApi {
    http: reqwest::Client,
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

#[async_trait]
impl TodoBackend for TodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let response = check_status(response, StatusCode::OK).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    async fn create(&self, todo: &NewTodo) -> Result<Todo, ApiError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(todo)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let response = check_status(response, StatusCode::CREATED).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    async fn update(&self, id: Uuid, patch: &TodoPatch) -> Result<Todo, ApiError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(patch)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let response = check_status(response, StatusCode::OK).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}

async fn check_status(response: Response, expected: StatusCode) -> Result<Response, ApiError> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().to_string(),
    }
}
