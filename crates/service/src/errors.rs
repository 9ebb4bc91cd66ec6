use models::errors::ModelError;
use thiserror::Error;

use crate::booking::lifecycle::LifecycleError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::NotFound(m) => ServiceError::NotFound(m),
            ModelError::Conflict(m) => ServiceError::Conflict(m),
            ModelError::Db(m) => ServiceError::Persistence(m),
        }
    }
}
