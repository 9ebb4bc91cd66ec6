#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use server::routes::build_cors;
use server::{build_router, ServerState};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::TokenAuthenticator;
use service::booking::repository::mock::MockBookingRepository;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub bookings: Arc<MockBookingRepository>,
    pub tokens: Arc<TokenAuthenticator>,
}

/// Router over in-memory repositories and an uninitialized pool.
pub fn test_app() -> TestApp {
    let tokens = Arc::new(TokenAuthenticator::new(SECRET, 1));
    let bookings = Arc::new(MockBookingRepository::default());
    let state = ServerState::new(
        DatabaseConnection::Disconnected,
        tokens.clone(),
        Arc::new(MockAuthRepository::default()),
        bookings.clone(),
    );
    TestApp { router: build_router(state.clone(), build_cors()), state, bookings, tokens }
}

pub struct Reply {
    pub status: StatusCode,
    pub set_cookie: Option<HeaderValue>,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    call(app, req).await
}

pub async fn call(app: &Router, req: Request<Body>) -> Reply {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let set_cookie = resp.headers().get(header::SET_COOKIE).cloned();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Reply { status, set_cookie, body }
}

/// Register a customer and return their token.
pub async fn register(app: &Router, email: &str) -> String {
    let reply = send(
        app,
        Method::POST,
        "/register",
        None,
        Some(serde_json::json!({"email": email, "password": "Passw0rd!"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "register {email}: {:?}", reply.body);
    reply.body["token"].as_str().unwrap().to_string()
}
