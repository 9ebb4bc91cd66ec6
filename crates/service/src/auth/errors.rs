use thiserror::Error;

/// Failures of registration, login and the request gate.
///
/// The first four are what the gate can produce; the server maps them to 401
/// or 403 without touching storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    Expired,
    #[error("insufficient role")]
    InsufficientRole,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("email already registered")]
    Conflict,
    #[error("password hashing failed: {0}")]
    HashError(String),
    #[error("token signing failed: {0}")]
    TokenError(String),
    #[error("user store: {0}")]
    Repository(String),
}
