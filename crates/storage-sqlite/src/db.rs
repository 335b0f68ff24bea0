//! Connection pool, embedded migrations and the serialized write handle.

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::debug;

use showdesk_core::errors::{DatabaseError, Error, Result};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_url: &str, max_size: u32) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::Pool(e.to_string())))?;
    Ok(Arc::new(pool))
}

pub fn get_connection(pool: &Arc<DbPool>) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| Error::Database(DatabaseError::Pool(e.to_string())))
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(DatabaseError::MigrationFailed(e.to_string())))?;
    debug!("Applied {} pending migrations", applied.len());
    Ok(())
}

/// Runs write closures on blocking threads against a pooled connection.
/// Read paths use the pool directly.
#[derive(Clone)]
pub struct WriteHandle {
    pool: Arc<DbPool>,
}

impl WriteHandle {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn exec<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let mut conn = get_connection(&pool)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::Internal(format!(
                "Write task join error: {}",
                e
            )))
        })?
    }
}
