use crate::{db::dao::DaoLayerError, error::AppError};

/// Static client-facing messages, one per failure path.
#[derive(Clone, Copy)]
pub struct CrudErrors {
    pub create_failed: &'static str,
    pub list_failed: &'static str,
    pub not_found: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

impl Default for CrudErrors {
    fn default() -> Self {
        Self {
            create_failed: "Create failed",
            list_failed: "Find failed",
            not_found: "Resource not found",
            update_failed: "Update failed",
            delete_failed: "Delete failed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrudOp {
    Create,
    List,
    Update,
    Delete,
}

impl CrudOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CrudOp::Create => "create",
            CrudOp::List => "list",
            CrudOp::Update => "update",
            CrudOp::Delete => "delete",
        }
    }
}

pub trait CrudService {
    fn errors(&self) -> CrudErrors {
        CrudErrors::default()
    }

    /// Storage faults are logged here and leave as a 500 with a static
    /// message; the fault text never reaches the client.
    fn map_error(&self, op: CrudOp, err: DaoLayerError) -> AppError {
        let errors = self.errors();
        match err {
            DaoLayerError::NotFound { entity, id } => {
                tracing::debug!(operation = op.as_str(), entity, %id, "record not found");
                AppError::not_found(errors.not_found)
            }
            DaoLayerError::Db(source) => {
                tracing::error!(operation = op.as_str(), error = %source, "storage failure");
                let message = match op {
                    CrudOp::Create => errors.create_failed,
                    CrudOp::List => errors.list_failed,
                    CrudOp::Update => errors.update_failed,
                    CrudOp::Delete => errors.delete_failed,
                };
                AppError::internal(message)
            }
        }
    }
}
