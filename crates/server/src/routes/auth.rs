use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::auth::domain::{AuthSession, LoginInput, RegisterInput};

use crate::errors::ApiError;
use crate::guard::AUTH_COOKIE;
use crate::routes::ServerState;

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(post, path = "/register", tag = "auth", request_body = crate::openapi::CredentialsRequest, responses((status = 201, description = "Registered", body = crate::openapi::SessionResponse), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<AuthSession>), ApiError> {
    let Json(input) = payload?;
    let session = state.auth.register(input).await?;
    let jar = jar.add(session_cookie(session.token.clone()));
    Ok((StatusCode::CREATED, jar, Json(session)))
}

#[utoipa::path(post, path = "/login", tag = "auth", request_body = crate::openapi::CredentialsRequest, responses((status = 200, description = "Logged In", body = crate::openapi::SessionResponse), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthSession>), ApiError> {
    let Json(input) = payload?;
    let session = state.auth.login(input).await?;
    let jar = jar.add(session_cookie(session.token.clone()));
    Ok((jar, Json(session)))
}
