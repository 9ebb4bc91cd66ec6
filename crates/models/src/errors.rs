use common::retry::AttemptError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure to reach the database at startup or while serving.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database unreachable after {attempts} attempts: {last}")]
    ConnectionExhausted {
        attempts: u32,
        #[source]
        last: AttemptError<DbErr>,
    },
    #[error("database error: {0}")]
    Query(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => ModelError::Conflict(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => ModelError::NotFound(detail),
            _ => match e {
                DbErr::RecordNotFound(what) => ModelError::NotFound(what),
                other => ModelError::Db(other.to_string()),
            },
        }
    }
}
