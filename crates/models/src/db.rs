use std::time::Duration;

use common::retry::RetryPolicy;
use configs::DatabaseConfig;
use futures_util::{Stream, StreamExt};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::errors::PersistenceError;

/// Upper bound for the health probe.
pub const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Open the pool, retrying per `policy`. Each attempt both connects and pings.
pub async fn connect(cfg: &DatabaseConfig, policy: &RetryPolicy) -> Result<DatabaseConnection, PersistenceError> {
    let mut opts = ConnectOptions::new(cfg.url().to_owned());
    opts.max_connections(cfg.pool.max_connections)
        .min_connections(cfg.pool.min_connections)
        .connect_timeout(policy.attempt_timeout())
        .acquire_timeout(Duration::from_secs(cfg.pool.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.pool.idle_timeout_secs))
        .sqlx_logging(cfg.pool.sqlx_logging);

    info!(host = %cfg.host, port = cfg.port, database = %cfg.name, "connecting to database");
    let db = policy
        .run("database_connect", || {
            let opts = opts.clone();
            async move {
                let db = Database::connect(opts).await?;
                db.ping().await?;
                Ok::<_, DbErr>(db)
            }
        })
        .await
        .map_err(|e| PersistenceError::ConnectionExhausted { attempts: e.attempts, last: e.last })?;

    info!(max_connections = cfg.pool.max_connections, "database pool ready");
    Ok(db)
}

/// Liveness probe. Never fails; any error or timeout reads as `false`.
pub async fn is_connected(db: &DatabaseConnection) -> bool {
    if matches!(db, DatabaseConnection::Disconnected) {
        return false;
    }
    match timeout(PING_TIMEOUT, db.ping()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(error = %e, "database ping failed");
            false
        }
        Err(_) => {
            warn!(timeout = ?PING_TIMEOUT, "database ping timed out");
            false
        }
    }
}

/// Row-level decode failures, as opposed to failures of the query itself.
pub fn is_decode_error(e: &DbErr) -> bool {
    use sea_orm::sqlx::Error as SqlxError;
    match e {
        DbErr::Type(_) | DbErr::TryIntoErr { .. } | DbErr::Json(_) => true,
        DbErr::Query(RuntimeErr::SqlxError(inner)) => {
            matches!(inner, SqlxError::ColumnDecode { .. } | SqlxError::Decode(_))
        }
        _ => false,
    }
}

/// Drain a model stream, skipping rows that fail to decode.
///
/// Any other error aborts the listing.
pub async fn collect_rows<S, M>(table: &'static str, stream: S) -> Result<Vec<M>, DbErr>
where
    S: Stream<Item = Result<M, DbErr>>,
{
    futures_util::pin_mut!(stream);
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    while let Some(item) = stream.next().await {
        match item {
            Ok(row) => rows.push(row),
            Err(e) if is_decode_error(&e) => {
                skipped += 1;
                warn!(table, error = %e, "skipping row that failed to decode");
            }
            Err(e) => return Err(e),
        }
    }
    if skipped > 0 {
        warn!(table, skipped, returned = rows.len(), "listing returned partial results");
    }
    Ok(rows)
}
