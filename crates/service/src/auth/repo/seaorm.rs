use models::errors::ModelError;
use models::user::{self, Role};
use sea_orm::DatabaseConnection;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_auth_user(u: &user::Model) -> AuthUser {
    AuthUser { id: u.id, email: u.email.clone(), role: u.role }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>, AuthError> {
        let res = user::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| Credentials { user: to_auth_user(&u), password_hash: u.password_hash }))
    }

    async fn create_user(&self, email: &str, password_hash: &str, role: Role) -> Result<AuthUser, AuthError> {
        let created = user::create(&self.db, email, password_hash, role).await.map_err(|e| match e {
            ModelError::Conflict(_) => AuthError::Conflict,
            ModelError::Validation(m) => AuthError::Validation(m),
            other => AuthError::Repository(other.to_string()),
        })?;
        Ok(to_auth_user(&created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique_email};

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let Some(db) = get_db().await else { return };
        let repo = SeaOrmAuthRepository::new(db);
        let email = unique_email("auth_repo");

        let created = repo.create_user(&email, "hash", Role::Customer).await.unwrap();
        let found = repo.find_by_email(&email).await.unwrap().expect("stored");
        assert_eq!(found.user, created);
        assert_eq!(found.password_hash, "hash");

        assert_eq!(repo.create_user(&email, "hash", Role::Customer).await, Err(AuthError::Conflict));
    }
}
