use crate::value_objects::ValueError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValueError),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Uniform for unknown users and wrong passwords
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<DbErr> for UserError {
    fn from(err: DbErr) -> Self {
        UserError::Storage(err.to_string())
    }
}

/// `DuplicateUsername` for unique violations, `Storage` for anything else.
pub(crate) fn map_insert_error(err: DbErr, username: &str) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            UserError::DuplicateUsername(username.to_string())
        }
        _ => err.into(),
    }
}
