use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, services::TodoService};

/// Shared by every handler.
pub struct AppState {
    pub config: AppConfig,
    pub todos: TodoService,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self {
            todos: TodoService::new(&db),
            config,
        })
    }
}
