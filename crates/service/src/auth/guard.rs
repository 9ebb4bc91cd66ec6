use models::user::Role;

use super::errors::AuthError;
use super::token::Claims;

/// Authorization policy of a route, declared once when the router is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Authenticated,
    Admin,
}

impl RouteAccess {
    pub fn required_role(&self) -> Option<Role> {
        match self {
            RouteAccess::Admin => Some(Role::Admin),
            RouteAccess::Public | RouteAccess::Authenticated => None,
        }
    }

    /// Decide a request given whatever identity was established for it.
    pub fn authorize(&self, claims: Option<&Claims>) -> Result<(), AuthError> {
        if *self == RouteAccess::Public {
            return Ok(());
        }
        let claims = claims.ok_or(AuthError::MissingToken)?;
        match self.required_role() {
            Some(role) => require_role(claims, role),
            None => Ok(()),
        }
    }
}

pub fn require_role(claims: &Claims, role: Role) -> Result<(), AuthError> {
    if claims.role == role {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole)
    }
}

/// Token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOMER: Claims = Claims { subject_id: 7, role: Role::Customer };
    const ADMIN: Claims = Claims { subject_id: 1, role: Role::Admin };

    #[test]
    fn admin_role_rejects_every_non_admin() {
        use sea_orm::Iterable;
        for role in Role::iter().filter(|r| *r != Role::Admin) {
            let claims = Claims { subject_id: 3, role };
            assert_eq!(require_role(&claims, Role::Admin), Err(AuthError::InsufficientRole));
        }
        assert_eq!(require_role(&ADMIN, Role::Admin), Ok(()));
    }

    #[test]
    fn policies() {
        assert_eq!(RouteAccess::Public.authorize(None), Ok(()));
        assert_eq!(RouteAccess::Authenticated.authorize(None), Err(AuthError::MissingToken));
        assert_eq!(RouteAccess::Authenticated.authorize(Some(&CUSTOMER)), Ok(()));
        assert_eq!(RouteAccess::Admin.authorize(Some(&CUSTOMER)), Err(AuthError::InsufficientRole));
        assert_eq!(RouteAccess::Admin.authorize(Some(&ADMIN)), Ok(()));
    }

    #[test]
    fn bearer_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer   abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
