//! Schema migrations.
//!
//! Versioned SQL files are read from the first migrations directory that exists
//! and applied forward through sqlx's migrator. Applied versions are tracked in
//! `_sqlx_migrations`, so running again against a current schema does nothing.

use std::path::{Path, PathBuf};

use sea_orm::DatabaseConnection;
use sqlx::migrate::{MigrateError, Migrator};
use thiserror::Error;
use tracing::info;

/// Fixed deployment locations probed after the working-directory candidates.
const DEPLOYMENT_DIRS: [&str; 2] = ["/app/migrations", "/app/db/migrations"];

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("no migrations directory found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
    #[error("cannot read migrations: {0}")]
    Source(#[source] MigrateError),
    #[error("applying migrations failed: {0}")]
    Apply(#[source] MigrateError),
    #[error("migrations require a postgres connection pool")]
    UnsupportedBackend,
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Candidate directories in probe order.
pub fn candidate_dirs(base: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![base.join("migrations"), base.join("db").join("migrations")];
    dirs.extend(DEPLOYMENT_DIRS.iter().map(PathBuf::from));
    dirs
}

pub fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|p| p.is_dir())
}

pub fn resolve_migrations_dir(base: &Path) -> Result<PathBuf, MigrationError> {
    let candidates = candidate_dirs(base);
    match first_existing(&candidates) {
        Some(dir) => Ok(dir.clone()),
        None => Err(MigrationError::NotFound { searched: candidates }),
    }
}

/// Apply every pending migration found under the resolved directory.
///
/// `base` is normally the process working directory.
pub async fn apply_migrations(db: &DatabaseConnection, base: &Path) -> Result<(), MigrationError> {
    let pool = match db {
        DatabaseConnection::SqlxPostgresPoolConnection(_) => db.get_postgres_connection_pool(),
        _ => return Err(MigrationError::UnsupportedBackend),
    };

    let dir = resolve_migrations_dir(base)?;
    let migrator = Migrator::new(dir.clone()).await.map_err(MigrationError::Source)?;
    info!(dir = %dir.display(), known = migrator.iter().count(), "applying migrations");

    migrator.run(pool).await.map_err(MigrationError::Apply)?;
    info!("migrations up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn probes_working_directory_before_deployment_paths() {
        let base = Path::new("/srv/cleaning");
        let dirs = candidate_dirs(base);
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/srv/cleaning/migrations"),
                PathBuf::from("/srv/cleaning/db/migrations"),
                PathBuf::from("/app/migrations"),
                PathBuf::from("/app/db/migrations"),
            ]
        );
    }

    #[test]
    fn first_existing_directory_wins() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("db/migrations")).unwrap();
        fs::create_dir_all(tmp.path().join("migrations")).unwrap();

        let resolved = resolve_migrations_dir(tmp.path()).unwrap();
        assert_eq!(resolved, tmp.path().join("migrations"));
    }

    #[test]
    fn falls_back_to_nested_db_directory() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("db/migrations")).unwrap();

        let resolved = resolve_migrations_dir(tmp.path()).unwrap();
        assert_eq!(resolved, tmp.path().join("db/migrations"));
    }

    #[test]
    fn plain_file_is_not_a_migrations_directory() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("migrations"), b"not a dir").unwrap();
        fs::create_dir_all(tmp.path().join("db/migrations")).unwrap();

        let resolved = resolve_migrations_dir(tmp.path()).unwrap();
        assert_eq!(resolved, tmp.path().join("db/migrations"));
    }

    #[test]
    fn missing_everywhere_reports_searched_paths() {
        if Path::new("/app/migrations").is_dir() || Path::new("/app/db/migrations").is_dir() {
            return;
        }
        let tmp = tempdir().unwrap();
        match resolve_migrations_dir(tmp.path()) {
            Err(MigrationError::NotFound { searched }) => assert_eq!(searched.len(), 4),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn disconnected_handle_is_rejected() {
        let err = apply_migrations(&DatabaseConnection::Disconnected, Path::new("."))
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::UnsupportedBackend));
    }

    #[tokio::test]
    async fn applying_twice_is_a_no_op() {
        let cfg = match configs::DatabaseConfig::from_env() {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("skip: {e}");
                return;
            }
        };
        let db = match sea_orm::Database::connect(cfg.url()).await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {e}");
                return;
            }
        };
        // crates/migration -> workspace root
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");

        apply_migrations(&db, &root).await.expect("first run");
        apply_migrations(&db, &root).await.expect("second run");
    }
}
