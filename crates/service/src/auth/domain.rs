use std::fmt;

use models::user::Role;
use serde::{Deserialize, Serialize};

/// Email and password as submitted to `/register` or `/login`.
#[derive(Clone, Deserialize)]
pub struct CredentialsInput {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CredentialsInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub type RegisterInput = CredentialsInput;
pub type LoginInput = CredentialsInput;

/// Account as exposed to clients; never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

/// Stored account used to check a login attempt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: AuthUser,
    pub password_hash: String,
}

/// Signed-in user plus the bearer token issued for them.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}
