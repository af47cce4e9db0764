use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A todo as the service returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
}

/// Partial update body. Absent fields are left alone by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn text(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Todo, TodoPatch};

    #[test]
    fn toggle_patch_sends_only_completed() {
        let body = serde_json::to_value(TodoPatch::completed(true)).unwrap();
        assert_eq!(body, json!({ "completed": true }));
    }

    #[test]
    fn text_patch_leaves_completed_out() {
        let body = serde_json::to_value(TodoPatch::text("Buy oat milk", "1L")).unwrap();
        assert_eq!(body, json!({ "title": "Buy oat milk", "description": "1L" }));
    }

    #[test]
    fn decodes_service_record() {
        let todo: Todo = serde_json::from_value(json!({
            "id": "6c8a6f1e-3d42-4a8e-9f6b-2a1d5c7e9b10",
            "title": "Buy milk",
            "description": "2%",
            "completed": false,
            "createdAt": "2026-01-01T10:00:00.123456+00:00",
            "updatedAt": "2026-01-01T10:00:00.123456+00:00"
        }))
        .unwrap();

        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
    }
}
