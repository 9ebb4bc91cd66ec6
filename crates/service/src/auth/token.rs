//! HS256 identity tokens.
//!
//! On the wire a token carries `{sub, role, iat, exp}` with `sub` the decimal
//! user id. Callers only ever see the typed [`Claims`].

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use models::user::Role;
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Verified identity attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claims {
    pub subject_id: i32,
    pub role: Role,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

const MAX_TTL_HOURS: i64 = 8760;

pub struct TokenAuthenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenAuthenticator {
    /// `ttl_hours` is clamped to between one hour and one year.
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::hours(ttl_hours.clamp(1, MAX_TTL_HOURS)),
        }
    }

    pub fn issue(&self, user_id: i32, role: Role) -> Result<String, AuthError> {
        self.issue_at(user_id, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: i32, role: Role, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = WireClaims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Check signature and expiry, then decode the identity.
    ///
    /// Touches no storage.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<WireClaims>(token, &self.decoding, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken,
        })?;
        let subject_id = data.claims.sub.parse::<i32>().map_err(|_| AuthError::InvalidToken)?;
        let role = data.claims.role.parse::<Role>().map_err(|_| AuthError::InvalidToken)?;
        Ok(Claims { subject_id, role })
    }
}
