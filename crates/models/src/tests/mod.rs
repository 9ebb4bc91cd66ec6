use std::path::Path;
use std::time::Duration;

use common::retry::RetryPolicy;
use sea_orm::DatabaseConnection;



/// Connect and migrate when `DB_*` variables point at a reachable database.
/// Returns `None` so callers can skip otherwise.
pub async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let cfg = configs::DatabaseConfig::from_env().ok()?;
    let policy = RetryPolicy::fixed(1, Duration::ZERO, Duration::from_secs(3));
    let db = match crate::db::connect(&cfg, &policy).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            return None;
        }
    };
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    migration::apply_migrations(&db, &root).await.expect("apply migrations");
    Some(db)
}

pub fn unique_email(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}_{nanos}@example.com")
}
