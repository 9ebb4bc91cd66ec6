use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use models::user::{validate_email, Role};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token::TokenAuthenticator;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    tokens: Arc<TokenAuthenticator>,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: Arc<TokenAuthenticator>) -> Self {
        Self { repo, tokens }
    }

    /// Register a new customer and issue a token for them.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenAuthenticator, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let tokens = Arc::new(TokenAuthenticator::new("secret", 72));
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), tokens.clone());
    /// let input = RegisterInput { email: "user@example.com".into(), password: "Secret123".into() };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "user@example.com");
    /// assert_eq!(tokens.verify(&session.token).unwrap().subject_id, session.user.id);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        validate_email(&input.email).map_err(|_| AuthError::Validation("invalid email".into()))?;
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if let Some(existing) = self.repo.find_by_email(&input.email).await? {
            debug!("user exists: {}", existing.user.email);
            return Err(AuthError::Conflict);
        }

        let hash = hash_password(&input.password)?;
        let user = self.repo.create_user(&input.email, &hash, Role::Customer).await?;
        info!(user_id = user.id, email = %user.email, "user_registered");

        let token = self.tokens.issue(user.id, user.role)?;
        Ok(AuthSession { user, token })
    }

    /// Authenticate a user and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenAuthenticator, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), Arc::new(TokenAuthenticator::new("secret", 72)));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let creds = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&creds.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(creds.user.id, creds.user.role)?;
        info!(user_id = creds.user.id, "user_logged_in");
        Ok(AuthSession { user: creds.user, token })
    }

    /// Create the admin account unless the email is already taken.
    ///
    /// Returns `true` when an account was created. An existing non-admin account
    /// under that email is left as is.
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        if let Some(existing) = self.repo.find_by_email(email).await? {
            if existing.user.role != Role::Admin {
                warn!(user_id = existing.user.id, "seed email belongs to a non-admin account; not promoting");
            }
            return Ok(false);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("admin password too short (>={MIN_PASSWORD_LEN})")));
        }
        let hash = hash_password(password)?;
        let admin: AuthUser = self.repo.create_user(email, &hash, Role::Admin).await?;
        info!(user_id = admin.id, "admin_seeded");
        Ok(true)
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> (AuthService<MockAuthRepository>, Arc<TokenAuthenticator>) {
        let tokens = Arc::new(TokenAuthenticator::new("unit-secret", 1));
        (AuthService::new(Arc::new(MockAuthRepository::default()), tokens.clone()), tokens)
    }

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput { email: email.into(), password: "Passw0rd!".into() }
    }

    #[tokio::test]
    async fn registered_users_are_customers() {
        let (svc, tokens) = svc();
        let session = svc.register(register_input("a@example.com")).await.unwrap();
        assert_eq!(session.user.role, Role::Customer);
        assert_eq!(tokens.verify(&session.token).unwrap().role, Role::Customer);
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let (svc, _) = svc();
        svc.register(register_input("a@example.com")).await.unwrap();
        let err = svc.register(register_input("A@Example.com")).await.unwrap_err();
        assert_eq!(err, AuthError::Conflict);
    }

    #[tokio::test]
    async fn short_password_and_bad_email_are_rejected() {
        let (svc, _) = svc();
        let short = RegisterInput { email: "a@example.com".into(), password: "short".into() };
        assert!(matches!(svc.register(short).await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.register(register_input("nope")).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let (svc, _) = svc();
        svc.register(register_input("a@example.com")).await.unwrap();
        let wrong = svc.login(LoginInput { email: "a@example.com".into(), password: "nottheone".into() }).await;
        let unknown = svc.login(LoginInput { email: "b@example.com".into(), password: "Passw0rd!".into() }).await;
        assert_eq!(wrong.unwrap_err(), AuthError::InvalidCredentials);
        assert_eq!(unknown.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let (svc, tokens) = svc();
        assert!(svc.ensure_admin("admin@example.com", "changeme123").await.unwrap());
        assert!(!svc.ensure_admin("admin@example.com", "changeme123").await.unwrap());

        let session = svc
            .login(LoginInput { email: "admin@example.com".into(), password: "changeme123".into() })
            .await
            .unwrap();
        assert!(tokens.verify(&session.token).unwrap().is_admin());
    }
}
