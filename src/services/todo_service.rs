use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    db::{
        dao::{DaoBase, TodoChanges, TodoDao},
        entities::todo,
    },
    error::AppError,
    services::crud_service::{CrudErrors, CrudOp, CrudService},
};

const TODO_ERRORS: CrudErrors = CrudErrors {
    create_failed: "Failed to create todo",
    list_failed: "Failed to fetch todos",
    not_found: "Todo not found",
    update_failed: "Failed to update todo",
    delete_failed: "Failed to delete todo",
};

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            todo_dao: TodoDao::new(db),
        }
    }

    pub async fn create_todo(
        &self,
        title: &str,
        description: &str,
    ) -> Result<todo::Model, AppError> {
        let todo = self
            .todo_dao
            .create_todo(title, description)
            .await
            .map_err(|err| self.map_error(CrudOp::Create, err))?;
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    pub async fn list_todos(&self) -> Result<Vec<todo::Model>, AppError> {
        self.todo_dao
            .list_todos()
            .await
            .map_err(|err| self.map_error(CrudOp::List, err))
    }

    pub async fn update_todo(
        &self,
        id: &Uuid,
        changes: TodoChanges,
    ) -> Result<todo::Model, AppError> {
        if changes.is_empty() {
            tracing::debug!(%id, "update carries no fields, only updatedAt moves");
        }
        let todo = self
            .todo_dao
            .update_todo(id, changes)
            .await
            .map_err(|err| self.map_error(CrudOp::Update, err))?;
        tracing::info!(%id, completed = todo.completed, "todo updated");
        Ok(todo)
    }

    pub async fn delete_todo(&self, id: &Uuid) -> Result<todo::Model, AppError> {
        let todo = self
            .todo_dao
            .delete_todo(id)
            .await
            .map_err(|err| self.map_error(CrudOp::Delete, err))?;
        tracing::info!(%id, "todo deleted");
        Ok(todo)
    }
}

impl CrudService for TodoService {
    fn errors(&self) -> CrudErrors {
        TODO_ERRORS
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use uuid::Uuid;

    use super::TodoService;
    use crate::{
        db::{dao::TodoChanges, entities::todo},
        error::AppError,
    };

    fn service(db: &sea_orm::DatabaseConnection) -> TodoService {
        TodoService::new(db)
    }

    #[tokio::test]
    async fn storage_failure_on_create_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("disk full".to_string())])
            .into_connection();

        let err = service(&db)
            .create_todo("Buy milk", "2%")
            .await
            .expect_err("create should fail");

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.message(), "Failed to create todo");
    }

    #[tokio::test]
    async fn storage_failure_on_list_hides_details() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let err = service(&db)
            .list_todos()
            .await
            .expect_err("list should fail");

        assert_eq!(err.message(), "Failed to fetch todos");
        assert!(!err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn unknown_id_on_update_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();

        let err = service(&db)
            .update_todo(
                &Uuid::new_v4(),
                TodoChanges {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect_err("update should fail");

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.message(), "Todo not found");
    }

    fn stored(id: Uuid) -> todo::Model {
        let ts = FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
            .single()
            .expect("timestamp should be valid");
        todo::Model {
            id,
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            completed: false,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[tokio::test]
    async fn storage_failure_on_update_is_internal() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored(id)]])
            .append_query_errors([DbErr::Custom("deadlock detected".to_string())])
            .into_connection();

        let err = service(&db)
            .update_todo(
                &id,
                TodoChanges {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect_err("update should fail");

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.message(), "Failed to update todo");
    }

    #[tokio::test]
    async fn storage_failure_on_delete_is_internal() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored(id)]])
            .append_exec_errors([DbErr::Custom("disk I/O error".to_string())])
            .into_connection();

        let err = service(&db)
            .delete_todo(&id)
            .await
            .expect_err("delete should fail");

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.message(), "Failed to delete todo");
    }

    #[tokio::test]
    async fn unknown_id_on_delete_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();

        let err = service(&db)
            .delete_todo(&Uuid::new_v4())
            .await
            .expect_err("delete should fail");

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
