use std::fmt::Write;

use crate::{state::TodoState, types::Todo};

pub fn active(todos: &[Todo]) -> impl Iterator<Item = &Todo> {
    todos.iter().filter(|todo| !todo.completed)
}

pub fn completed(todos: &[Todo]) -> impl Iterator<Item = &Todo> {
    todos.iter().filter(|todo| todo.completed)
}

/// Plain text rendering: feedback lines, then the active and completed lists.
pub fn render(state: &TodoState) -> String {
    let mut out = String::new();
    if let Some(message) = &state.message {
        let _ = writeln!(out, "{message}");
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {error}");
    }

    section(&mut out, "Active Todos", active(&state.todos), state);
    out.push('\n');
    section(&mut out, "Completed Todos", completed(&state.todos), state);
    out
}

fn section<'a>(
    out: &mut String,
    heading: &str,
    todos: impl Iterator<Item = &'a Todo>,
    state: &TodoState,
) {
    let _ = writeln!(out, "{heading}");
    let mut empty = true;
    for todo in todos {
        empty = false;
        match state.editing.as_ref().filter(|edit| edit.id == todo.id) {
            Some(edit) => {
                let _ = writeln!(out, "  * {}  {} (editing)", todo.id, edit.title);
                let _ = writeln!(out, "      {}", edit.description);
            }
            None => {
                let _ = writeln!(out, "  - {}  {}", todo.id, todo.title);
                if !todo.description.is_empty() {
                    let _ = writeln!(out, "      {}", todo.description);
                }
            }
        }
    }
    if empty {
        let _ = writeln!(out, "  (none)");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{active, completed, render};
    use crate::{
        state::{Action, TodoState},
        types::Todo,
    };

    fn todo(title: &str, done: bool) -> Todo {
        let now = Utc::now().fixed_offset();
        Todo {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            completed: done,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn splits_by_completion_in_order() {
        let todos = vec![todo("a", false), todo("b", true), todo("c", false)];

        let open: Vec<&str> = active(&todos).map(|t| t.title.as_str()).collect();
        let done: Vec<&str> = completed(&todos).map(|t| t.title.as_str()).collect();

        assert_eq!(open, vec!["a", "c"]);
        assert_eq!(done, vec!["b"]);
    }

    #[test]
    fn render_follows_state_changes() {
        let item = todo("Buy milk", false);
        let id = item.id;
        let mut state = TodoState::default();
        state.reduce(Action::Loaded(vec![item]));

        let before = render(&state);
        let (open, done) = before.split_once("Completed Todos").unwrap();
        assert!(open.contains("Buy milk"));
        assert!(done.contains("(none)"));

        state.reduce(Action::Toggled { id, completed: true });

        let after = render(&state);
        let (open, done) = after.split_once("Completed Todos").unwrap();
        assert!(!open.contains("Buy milk"));
        assert!(done.contains("Buy milk"));
    }
}
