//! Startup: configuration, database bootstrap, then the listener.
//!
//! The listener is bound only after the pool is up, migrations are applied and
//! the optional admin account exists.

use std::sync::Arc;

use common::retry::RetryPolicy;
use configs::AppConfig;
use service::auth::TokenAuthenticator;
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// Load `.env` (if present) and read the configuration from the environment.
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenvy::dotenv().ok();
    Ok(AppConfig::from_env()?)
}

/// Connect with bounded retry, migrate and seed. Fails on the first error.
pub async fn bootstrap(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db = models::db::connect(&cfg.database, &RetryPolicy::database_default()).await?;

    let base = std::env::current_dir()?;
    migration::apply_migrations(&db, &base).await?;

    let tokens = Arc::new(TokenAuthenticator::new(&cfg.auth.jwt_secret, cfg.auth.token_ttl_hours));
    let state = ServerState::with_database(db, tokens);

    if let Some(seed) = &cfg.auth.admin {
        let created = state
            .auth
            .ensure_admin(&seed.email, &seed.password)
            .await
            .map_err(StartupError::Seed)?;
        info!(email = %seed.email, created, "admin account checked");
    }
    Ok(state)
}

/// Bootstrap, then serve until the listener fails.
pub async fn serve(cfg: AppConfig) -> Result<(), StartupError> {
    let state = bootstrap(&cfg).await?;
    let app = routes::build_router(state, routes::build_cors());

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
