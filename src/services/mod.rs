pub mod crud_service;
pub mod todo_service;

pub use todo_service::TodoService;
