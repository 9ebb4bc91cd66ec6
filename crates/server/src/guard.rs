//! Request gate. Each route group declares its [`RouteAccess`] once, when the
//! router is built; the layers below enforce it before any handler runs.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::MethodRouter;
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use service::auth::errors::AuthError;
use service::auth::guard::bearer_token;
use service::auth::{Claims, RouteAccess};
use tracing::debug;

use crate::errors::ApiError;
use crate::routes::ServerState;

/// Cookie set at login, accepted when no `Authorization` header is sent.
pub const AUTH_COOKIE: &str = "auth_token";

fn extract_token(headers: &HeaderMap) -> Result<String, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;
        return bearer_token(value).map(str::to_owned).ok_or(AuthError::InvalidToken);
    }
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Verify the token and attach [`Claims`] to the request.
pub async fn require_authenticated(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers())?;
    let claims = state.tokens.verify(&token)?;
    debug!(user_id = claims.subject_id, role = %claims.role, "authenticated");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Must sit inside [`require_authenticated`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    RouteAccess::Admin.authorize(req.extensions().get::<Claims>())?;
    Ok(next.run(req).await)
}

/// Apply `access` to every route of `router`.
pub fn guard_routes(router: Router<ServerState>, access: RouteAccess, state: &ServerState) -> Router<ServerState> {
    match access {
        RouteAccess::Public => router,
        RouteAccess::Authenticated => {
            router.route_layer(middleware::from_fn_with_state(state.clone(), require_authenticated))
        }
        // the layer added last runs first
        RouteAccess::Admin => router
            .route_layer(middleware::from_fn(require_admin))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_authenticated)),
    }
}

/// Same as [`guard_routes`] for a single method handler, so one path can mix
/// policies per method.
pub fn guard_method(
    method: MethodRouter<ServerState>,
    access: RouteAccess,
    state: &ServerState,
) -> MethodRouter<ServerState> {
    match access {
        RouteAccess::Public => method,
        RouteAccess::Authenticated => {
            method.route_layer(middleware::from_fn_with_state(state.clone(), require_authenticated))
        }
        RouteAccess::Admin => method
            .route_layer(middleware::from_fn(require_admin))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_authenticated)),
    }
}
