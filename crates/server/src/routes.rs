use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::{AuthService, RouteAccess, TokenAuthenticator};
use service::booking::repo::seaorm::SeaOrmBookingRepository;
use service::booking::repository::BookingRepository;
use service::booking::BookingService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::guard::{guard_method, guard_routes};
use crate::openapi::ApiDoc;

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod orders;

/// Shared handles for every request. Built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub tokens: Arc<TokenAuthenticator>,
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub bookings: BookingService,
}

impl ServerState {
    pub fn new(
        db: DatabaseConnection,
        tokens: Arc<TokenAuthenticator>,
        auth_repo: Arc<dyn AuthRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            db,
            auth: Arc::new(AuthService::new(auth_repo, tokens.clone())),
            tokens,
            bookings: BookingService::new(booking_repo),
        }
    }

    /// State backed by the sea-orm repositories on `db`.
    pub fn with_database(db: DatabaseConnection, tokens: Arc<TokenAuthenticator>) -> Self {
        let auth_repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let booking_repo = Arc::new(SeaOrmBookingRepository::new(db.clone()));
        Self::new(db, tokens, auth_repo, booking_repo)
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        db: models::db::is_connected(&state.db).await,
        time: Utc::now().to_rfc3339(),
    })
}

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the full application router, including public, customer and admin routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/services",
            get(catalog::list_services).merge(guard_method(post(catalog::create_service), RouteAccess::Admin, &state)),
        )
        .route("/reviews", get(catalog::list_reviews));

    // Routes for any signed-in user; ownership is checked further in
    let customer = guard_routes(
        Router::new()
            .route("/orders", post(orders::create_order).get(orders::my_orders))
            .route("/orders/:id", delete(orders::delete_order))
            .route("/orders/:id/cancel", post(orders::cancel_order))
            .route("/orders/:id/reviews", post(orders::create_review)),
        RouteAccess::Authenticated,
        &state,
    );

    // Admin routes
    let admin_routes = guard_routes(
        Router::new()
            .route("/admin/orders", get(admin::list_orders))
            .route("/admin/orders/:id", patch(admin::update_order_status).delete(admin::delete_order)),
        RouteAccess::Admin,
        &state,
    );

    // Compose
    public
        .merge(customer)
        .merge(admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and friends at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
