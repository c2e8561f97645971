use crate::query::QueryError;
use crate::value_objects::ValueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValueError),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Storage(err.to_string())
    }
}
