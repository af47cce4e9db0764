pub mod api;
pub mod session;
pub mod state;
pub mod types;
pub mod view;

pub use api::{ApiError, TodoApi, TodoBackend};
pub use session::{Confirm, TodoSession};
pub use state::{Action, TodoState};
pub use types::{NewTodo, Todo, TodoPatch};
