use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::{dao::TodoChanges, entities::todo},
    error::AppError,
    state::AppState,
};

const TODO_NOT_FOUND: &str = "Todo not found";

/// Body of `POST /todos`. Missing fields are stored as empty strings; the
/// client is the one that insists on non-empty input.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", post(create_todo).get(list_todos))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(state)
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let todo = state.todos.create_todo(&body.title, &body.description).await?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state.todos.list_todos().await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    let id = parse_todo_id(&id)?;
    let todo = state.todos.update_todo(&id, body.into()).await?;
    Ok(Json(todo.into()))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_todo_id(&id)?;
    state.todos.delete_todo(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// An id that is not a UUID can never name a stored todo.
fn parse_todo_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::not_found(TODO_NOT_FOUND))
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(body: UpdateTodoRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            completed: body.completed,
        }
    }
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
