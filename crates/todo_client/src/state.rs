//! Client state and the reducer that owns every transition.
//!
//! Nothing here performs I/O. The session runs requests, turns their outcome
//! into an [`Action`] and hands it to [`TodoState::reduce`]; the returned
//! [`Effect`] tells it whether a message timer has to be (re)started.

use uuid::Uuid;

use crate::types::Todo;

pub const FETCH_FAILED: &str = "Unable to fetch items.";
pub const CREATE_REQUIRED: &str = "Both title and description are required.";
pub const CREATE_FAILED: &str = "Unable to create Todo item.";
pub const CREATED: &str = "Item added successfully!";
pub const UPDATE_REQUIRED: &str = "Both title and description are required for updating.";
pub const UPDATE_FAILED: &str = "Unable to update Todo item.";
pub const UPDATED: &str = "Item updated successfully!";
pub const TOGGLE_FAILED: &str = "Unable to update task status.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this item?";
pub const DELETE_FAILED: &str = "Unable to delete item.";
pub const DELETED: &str = "Item deleted successfully!";

/// The record being edited inline and its unsaved drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    pub title: String,
    pub description: String,
    pub editing: Option<EditSession>,
    pub error: Option<String>,
    pub message: Option<String>,
    message_generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    TitleChanged(String),
    DescriptionChanged(String),
    EditTitleChanged(String),
    EditDescriptionChanged(String),
    Loaded(Vec<Todo>),
    FetchFailed,
    Created(Todo),
    Updated {
        id: Uuid,
        title: String,
        description: String,
    },
    Toggled {
        id: Uuid,
        completed: bool,
    },
    Deleted(Uuid),
    RequestFailed(&'static str),
    InputRejected(&'static str),
    EditStarted(Uuid),
    EditCancelled,
    MessageExpired {
        generation: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Clear the success message after the delay unless a newer one replaced it.
    ClearMessageLater { generation: u64 },
}

impl TodoState {
    pub fn find(&self, id: Uuid) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn is_editing(&self, id: Uuid) -> bool {
        self.editing.as_ref().is_some_and(|edit| edit.id == id)
    }

    pub fn reduce(&mut self, action: Action) -> Effect {
        match action {
            Action::TitleChanged(title) => self.title = title,
            Action::DescriptionChanged(description) => self.description = description,
            Action::EditTitleChanged(title) => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.title = title;
                }
            }
            Action::EditDescriptionChanged(description) => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.description = description;
                }
            }
            Action::Loaded(todos) => {
                self.todos = todos;
                self.error = None;
            }
            Action::FetchFailed => self.error = Some(FETCH_FAILED.to_string()),
            Action::Created(todo) => {
                self.todos.push(todo);
                self.title.clear();
                self.description.clear();
                return self.show_message(CREATED);
            }
            Action::Updated {
                id,
                title,
                description,
            } => {
                if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.title = title;
                    todo.description = description;
                }
                if self.is_editing(id) {
                    self.editing = None;
                }
                return self.show_message(UPDATED);
            }
            Action::Toggled { id, completed } => {
                if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.completed = completed;
                }
                self.error = None;
            }
            Action::Deleted(id) => {
                self.todos.retain(|todo| todo.id != id);
                if self.is_editing(id) {
                    self.editing = None;
                }
                return self.show_message(DELETED);
            }
            Action::RequestFailed(error) | Action::InputRejected(error) => {
                self.error = Some(error.to_string());
            }
            Action::EditStarted(id) => {
                let edit = self.find(id).map(|todo| EditSession {
                    id,
                    title: todo.title.clone(),
                    description: todo.description.clone(),
                });
                if edit.is_some() {
                    self.editing = edit;
                }
            }
            Action::EditCancelled => self.editing = None,
            Action::MessageExpired { generation } => {
                if generation == self.message_generation {
                    self.message = None;
                }
            }
        }
        Effect::None
    }

    fn show_message(&mut self, message: &str) -> Effect {
        self.error = None;
        self.message = Some(message.to_string());
        self.message_generation += 1;
        Effect::ClearMessageLater {
            generation: self.message_generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use uuid::Uuid;

    use super::*;

    fn todo(title: &str, completed: bool) -> Todo {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .unwrap();
        Todo {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("{title} details"),
            completed,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn loaded(todos: Vec<Todo>) -> TodoState {
        let mut state = TodoState::default();
        state.reduce(Action::Loaded(todos));
        state
    }

    #[test]
    fn created_appends_and_clears_inputs() {
        let existing = todo("first", false);
        let mut state = loaded(vec![existing.clone()]);
        state.reduce(Action::TitleChanged("Buy milk".into()));
        state.reduce(Action::DescriptionChanged("2%".into()));

        let created = todo("Buy milk", false);
        let effect = state.reduce(Action::Created(created.clone()));

        assert_eq!(state.todos, vec![existing, created]);
        assert!(state.title.is_empty());
        assert!(state.description.is_empty());
        assert_eq!(state.message.as_deref(), Some(CREATED));
        assert_eq!(effect, Effect::ClearMessageLater { generation: 1 });
    }

    #[test]
    fn fetch_failure_keeps_todos() {
        let existing = todo("first", false);
        let mut state = loaded(vec![existing.clone()]);

        assert_eq!(state.reduce(Action::FetchFailed), Effect::None);
        assert_eq!(state.todos, vec![existing]);
        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED));
    }

    #[test]
    fn request_failure_only_sets_error() {
        let mut state = loaded(vec![todo("first", false)]);
        let before = state.todos.clone();

        state.reduce(Action::RequestFailed(TOGGLE_FAILED));

        assert_eq!(state.todos, before);
        assert_eq!(state.error.as_deref(), Some(TOGGLE_FAILED));
        assert!(state.message.is_none());
    }

    #[test]
    fn edit_seeds_drafts_and_update_keeps_completion() {
        let item = todo("Buy milk", true);
        let id = item.id;
        let mut state = loaded(vec![item]);

        state.reduce(Action::EditStarted(id));
        assert_eq!(
            state.editing,
            Some(EditSession {
                id,
                title: "Buy milk".into(),
                description: "Buy milk details".into(),
            })
        );

        state.reduce(Action::EditTitleChanged("Buy oat milk".into()));
        state.reduce(Action::Updated {
            id,
            title: "Buy oat milk".into(),
            description: "1L".into(),
        });

        let stored = state.find(id).unwrap();
        assert_eq!(stored.title, "Buy oat milk");
        assert_eq!(stored.description, "1L");
        assert!(stored.completed);
        assert!(state.editing.is_none());
        assert_eq!(state.message.as_deref(), Some(UPDATED));
    }

    #[test]
    fn starting_another_edit_replaces_the_first() {
        let a = todo("a", false);
        let b = todo("b", false);
        let mut state = loaded(vec![a.clone(), b.clone()]);

        state.reduce(Action::EditStarted(a.id));
        state.reduce(Action::EditStarted(b.id));

        assert!(state.is_editing(b.id));
        assert!(!state.is_editing(a.id));

        state.reduce(Action::EditCancelled);
        assert!(state.editing.is_none());
    }

    #[test]
    fn editing_unknown_id_is_ignored() {
        let mut state = loaded(vec![todo("a", false)]);
        state.reduce(Action::EditStarted(Uuid::new_v4()));
        assert!(state.editing.is_none());
    }

    #[test]
    fn toggled_flips_only_that_todo() {
        let a = todo("a", false);
        let b = todo("b", false);
        let mut state = loaded(vec![a.clone(), b.clone()]);

        state.reduce(Action::Toggled {
            id: a.id,
            completed: true,
        });

        assert!(state.find(a.id).unwrap().completed);
        assert!(!state.find(b.id).unwrap().completed);
    }

    #[test]
    fn deleted_removes_todo() {
        let a = todo("a", false);
        let b = todo("b", true);
        let mut state = loaded(vec![a.clone(), b.clone()]);

        state.reduce(Action::Deleted(a.id));

        assert_eq!(state.todos, vec![b]);
        assert_eq!(state.message.as_deref(), Some(DELETED));
    }

    #[test]
    fn stale_expiry_does_not_clear_newer_message() {
        let mut state = loaded(Vec::new());
        let first = state.reduce(Action::Created(todo("a", false)));
        let second = state.reduce(Action::Deleted(Uuid::new_v4()));

        let Effect::ClearMessageLater { generation: old } = first else {
            panic!("create should schedule a clear");
        };
        let Effect::ClearMessageLater { generation: new } = second else {
            panic!("delete should schedule a clear");
        };

        state.reduce(Action::MessageExpired { generation: old });
        assert_eq!(state.message.as_deref(), Some(DELETED));

        state.reduce(Action::MessageExpired { generation: new });
        assert!(state.message.is_none());
    }

    #[test]
    fn success_clears_previous_error() {
        let mut state = loaded(Vec::new());
        state.reduce(Action::InputRejected(CREATE_REQUIRED));
        state.reduce(Action::Created(todo("a", false)));
        assert!(state.error.is_none());
    }
}
