use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::{prelude::Todo, todo};

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todo;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Fields a partial update may overwrite. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    fn apply(self, active: &mut todo::ActiveModel) {
        if let Some(title) = self.title {
            active.title = Set(title);
        }
        if let Some(description) = self.description {
            active.description = Set(description);
        }
        if let Some(completed) = self.completed {
            active.completed = Set(completed);
        }
    }
}

impl TodoDao {
    pub async fn create_todo(&self, title: &str, description: &str) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            completed: Set(false),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn list_todos(&self) -> DaoResult<Vec<todo::Model>> {
        self.find_all().await
    }

    pub async fn update_todo(&self, id: &Uuid, changes: TodoChanges) -> DaoResult<todo::Model> {
        self.update(*id, move |active| changes.apply(active)).await
    }

    pub async fn delete_todo(&self, id: &Uuid) -> DaoResult<todo::Model> {
        self.delete(*id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{
        ActiveValue, DatabaseBackend, DbErr, IntoActiveModel, MockDatabase, MockExecResult,
        QueryTrait,
    };
    use uuid::Uuid;

    use super::{TodoChanges, TodoDao};
    use crate::db::{
        dao::{DaoBase, DaoLayerError},
        entities::todo,
    };

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn todo_model(id: Uuid, title: &str, description: &str, completed: bool) -> todo::Model {
        let now = ts();
        todo::Model {
            id,
            title: title.to_string(),
            description: description.to_string(),
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn changes_only_touch_supplied_fields() {
        let existing = todo_model(Uuid::new_v4(), "Buy milk", "2%", false);
        let mut active = existing.into_active_model();

        TodoChanges {
            completed: Some(true),
            ..Default::default()
        }
        .apply(&mut active);

        assert!(matches!(active.completed, ActiveValue::Set(true)));
        assert!(matches!(&active.title, ActiveValue::Unchanged(title) if title == "Buy milk"));
        assert!(matches!(&active.description, ActiveValue::Unchanged(d) if d == "2%"));
    }

    #[test]
    fn empty_changes_are_detected() {
        assert!(TodoChanges::default().is_empty());
        assert!(
            !TodoChanges {
                title: Some(String::new()),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[tokio::test]
    async fn update_todo_reports_missing_record() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao
            .update_todo(
                &id,
                TodoChanges {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect_err("missing todo should fail");
        assert!(matches!(err, DaoLayerError::NotFound { id: missing, .. } if missing == id));
    }

    #[tokio::test]
    async fn update_of_row_deleted_mid_flight_is_not_found() {
        let id = Uuid::new_v4();
        let stored = todo_model(id, "Buy milk", "2%", false);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored]])
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao
            .update_todo(
                &id,
                TodoChanges {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect_err("vanished todo should fail");
        assert!(matches!(err, DaoLayerError::NotFound { id: missing, .. } if missing == id));
    }

    #[test]
    fn list_order_breaks_timestamp_ties_by_id() {
        let sql = TodoDao::list_query()
            .build(DatabaseBackend::Postgres)
            .to_string();
        assert!(
            sql.ends_with(r#"ORDER BY "todos"."created_at" ASC, "todos"."id" ASC"#),
            "unexpected list query: {sql}"
        );
    }

    #[tokio::test]
    async fn delete_todo_reports_missing_record() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao
            .delete_todo(&id)
            .await
            .expect_err("missing todo should fail");
        assert!(matches!(err, DaoLayerError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_todo_returns_removed_record() {
        let id = Uuid::new_v4();
        let stored = todo_model(id, "Buy milk", "2%", true);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let dao = TodoDao::new(&db);

        let removed = dao.delete_todo(&id).await.expect("delete should succeed");
        assert_eq!(removed, stored);
    }

    #[tokio::test]
    async fn list_todos_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("list failed".to_string())])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao.list_todos().await.expect_err("list should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }

    #[tokio::test]
    async fn list_todos_returns_every_row() {
        let first = todo_model(Uuid::new_v4(), "a", "b", false);
        let second = todo_model(Uuid::new_v4(), "c", "d", true);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![first.clone(), second.clone()]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let todos = dao.list_todos().await.expect("list should succeed");
        assert_eq!(todos, vec![first, second]);
    }
}
