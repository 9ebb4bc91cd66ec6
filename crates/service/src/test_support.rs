#![cfg(test)]
use std::path::Path;
use std::time::Duration;

use common::retry::RetryPolicy;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// A migrated connection, or `None` when no database is configured.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let cfg = configs::DatabaseConfig::from_env().ok()?;
    let policy = RetryPolicy::fixed(1, Duration::ZERO, Duration::from_secs(3));

    let migrated = MIGRATED
        .get_or_init(|| async {
            let Ok(db) = models::db::connect(&cfg, &policy).await else { return false };
            let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
            migration::apply_migrations(&db, &root).await.expect("apply migrations");
            true
        })
        .await;
    if !*migrated {
        return None;
    }

    // Return a fresh connection for the current test's runtime
    models::db::connect(&cfg, &policy).await.ok()
}

pub fn unique_email(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}_{nanos}@example.com")
}
