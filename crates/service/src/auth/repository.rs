use async_trait::async_trait;
use models::user::Role;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Emails are compared case-insensitively.
    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>, AuthError>;
    async fn create_user(&self, email: &str, password_hash: &str, role: Role) -> Result<AuthUser, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, Credentials>>, // key: lowercased email
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&email.trim().to_lowercase()).cloned())
        }

        async fn create_user(&self, email: &str, password_hash: &str, role: Role) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            let key = email.trim().to_lowercase();
            if users.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            let id = users.len() as i32 + 1;
            let user = AuthUser { id, email: key.clone(), role };
            users.insert(key, Credentials { user: user.clone(), password_hash: password_hash.to_string() });
            Ok(user)
        }
    }
}
