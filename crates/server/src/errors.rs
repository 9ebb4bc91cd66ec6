use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use configs::ConfigError;
use migration::MigrationError;
use models::errors::PersistenceError;
use service::auth::errors::AuthError;
use service::booking::LifecycleError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Request-level failure. The client sees a short message for the status; the
/// underlying detail only goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("malformed request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(e) => match e {
                AuthError::MissingToken | AuthError::InvalidToken | AuthError::Expired => StatusCode::UNAUTHORIZED,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::InsufficientRole => StatusCode::FORBIDDEN,
                AuthError::Validation(_) => StatusCode::BAD_REQUEST,
                AuthError::Conflict => StatusCode::CONFLICT,
                AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Service(e) => match e {
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::Lifecycle(LifecycleError::IllegalTransition { .. }) => StatusCode::CONFLICT,
                ServiceError::Lifecycle(LifecycleError::Forbidden { .. }) => StatusCode::FORBIDDEN,
                ServiceError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Auth(AuthError::Expired) => "token expired".into(),
            ApiError::Auth(AuthError::MissingToken | AuthError::InvalidToken) => "invalid or missing token".into(),
            ApiError::Auth(AuthError::InvalidCredentials) => "invalid credentials".into(),
            ApiError::Auth(AuthError::InsufficientRole) => "insufficient role".into(),
            ApiError::Auth(AuthError::Conflict) => "email already registered".into(),
            // validation messages describe the client's own input
            ApiError::Auth(AuthError::Validation(m)) | ApiError::Service(ServiceError::Validation(m)) => m.clone(),
            ApiError::Service(ServiceError::Lifecycle(LifecycleError::IllegalTransition { from, to })) => {
                format!("cannot change status from {from} to {to}")
            }
            ApiError::BadRequest(_) => "malformed request".into(),
            _ => match self.status() {
                StatusCode::NOT_FOUND => "not found".into(),
                StatusCode::FORBIDDEN => "forbidden".into(),
                StatusCode::CONFLICT => "conflict with current state".into(),
                _ => "internal server error".into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ErrorBody { error: self.public_message() })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Anything that stops the process before it starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error("admin seeding failed: {0}")]
    Seed(#[source] AuthError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
