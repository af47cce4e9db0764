use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    api::TodoBackend,
    state::{
        Action, CREATE_FAILED, CREATE_REQUIRED, DELETE_FAILED, DELETE_PROMPT, Effect,
        TOGGLE_FAILED, TodoState, UPDATE_FAILED, UPDATE_REQUIRED,
    },
    types::{NewTodo, TodoPatch},
};

pub const MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Asks the user before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

type SharedState = Arc<Mutex<TodoState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, TodoState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Delayed `MessageExpired` dispatch. At most one is pending; scheduling a
/// new one or dropping the timer aborts the old task.
struct MessageTimer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl MessageTimer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    fn schedule(&mut self, state: &SharedState, generation: u64) {
        self.cancel();
        let state = Arc::clone(state);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&state).reduce(Action::MessageExpired { generation });
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for MessageTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs user intents against the service and feeds the outcome to the reducer.
///
/// Must be used from inside a tokio runtime; success messages schedule a
/// clearing task on it.
pub struct TodoSession<B> {
    backend: B,
    state: SharedState,
    timer: MessageTimer,
}

impl<B: TodoBackend> TodoSession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_message_ttl(backend, MESSAGE_TTL)
    }

    pub fn with_message_ttl(backend: B, ttl: Duration) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(TodoState::default())),
            timer: MessageTimer::new(ttl),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot(&self) -> TodoState {
        lock(&self.state).clone()
    }

    pub fn dispatch(&mut self, action: Action) {
        let effect = lock(&self.state).reduce(action);
        if let Effect::ClearMessageLater { generation } = effect {
            self.timer.schedule(&self.state, generation);
        }
    }

    pub async fn load(&mut self) {
        match self.backend.list().await {
            Ok(todos) => self.dispatch(Action::Loaded(todos)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch todos");
                self.dispatch(Action::FetchFailed);
            }
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.dispatch(Action::TitleChanged(title.into()));
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.dispatch(Action::DescriptionChanged(description.into()));
    }

    /// Creates a todo from the current title and description inputs.
    pub async fn create(&mut self) {
        let (title, description) = {
            let state = lock(&self.state);
            (state.title.clone(), state.description.clone())
        };
        if title.trim().is_empty() || description.trim().is_empty() {
            self.dispatch(Action::InputRejected(CREATE_REQUIRED));
            return;
        }

        let new = NewTodo { title, description };
        match self.backend.create(&new).await {
            Ok(todo) => self.dispatch(Action::Created(todo)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to create todo");
                self.dispatch(Action::RequestFailed(CREATE_FAILED));
            }
        }
    }

    pub fn begin_edit(&mut self, id: Uuid) {
        self.dispatch(Action::EditStarted(id));
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        self.dispatch(Action::EditTitleChanged(title.into()));
    }

    pub fn set_edit_description(&mut self, description: impl Into<String>) {
        self.dispatch(Action::EditDescriptionChanged(description.into()));
    }

    pub fn cancel_edit(&mut self) {
        self.dispatch(Action::EditCancelled);
    }

    /// Sends the drafts of the open edit. Completion is never part of it.
    pub async fn commit_edit(&mut self) {
        let Some(edit) = lock(&self.state).editing.clone() else {
            return;
        };
        if edit.title.trim().is_empty() || edit.description.trim().is_empty() {
            self.dispatch(Action::InputRejected(UPDATE_REQUIRED));
            return;
        }

        let patch = TodoPatch::text(edit.title.clone(), edit.description.clone());
        match self.backend.update(edit.id, &patch).await {
            Ok(_) => self.dispatch(Action::Updated {
                id: edit.id,
                title: edit.title,
                description: edit.description,
            }),
            Err(err) => {
                tracing::warn!(id = %edit.id, error = %err, "failed to update todo");
                self.dispatch(Action::RequestFailed(UPDATE_FAILED));
            }
        }
    }

    pub async fn toggle(&mut self, id: Uuid) {
        let Some(current) = lock(&self.state).find(id).map(|todo| todo.completed) else {
            return;
        };

        let completed = !current;
        match self
            .backend
            .update(id, &TodoPatch::completed(completed))
            .await
        {
            Ok(_) => self.dispatch(Action::Toggled { id, completed }),
            Err(err) => {
                tracing::warn!(%id, error = %err, "failed to toggle todo");
                self.dispatch(Action::RequestFailed(TOGGLE_FAILED));
            }
        }
    }

    /// Deletes after `confirm` agrees; a declined prompt sends nothing.
    pub async fn delete(&mut self, id: Uuid, confirm: &mut impl Confirm) {
        if !confirm.confirm(DELETE_PROMPT) {
            return;
        }

        match self.backend.delete(id).await {
            Ok(()) => self.dispatch(Action::Deleted(id)),
            Err(err) => {
                tracing::warn!(%id, error = %err, "failed to delete todo");
                self.dispatch(Action::RequestFailed(DELETE_FAILED));
            }
        }
    }
}
