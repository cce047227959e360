//! Embedded Diesel migrations, applied at startup.

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled into the binary from `backend/migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Error applying the embedded migrations.
#[derive(Debug, thiserror::Error)]
#[error("migration failed: {message}")]
pub struct MigrationError {
    message: String,
}

/// Apply pending migrations over a dedicated connection.
///
/// The migration harness is synchronous, so it drives the async connection
/// through a wrapper on a blocking thread.
pub async fn run_pending_migrations(database_url: String) -> Result<(), MigrationError> {
    tokio::task::spawn_blocking(move || {
        let mut conn: AsyncConnectionWrapper<AsyncPgConnection> =
            AsyncConnectionWrapper::establish(&database_url).map_err(|err| MigrationError {
                message: err.to_string(),
            })?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError {
                message: err.to_string(),
            })?;
        for version in applied {
            info!(%version, "applied migration");
        }
        Ok(())
    })
    .await
    .map_err(|err| MigrationError {
        message: err.to_string(),
    })?
}
