//! For interacting with the database.

use super::config::DatabaseConfig;
use sqlx::{
    pool::PoolOptions,
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions, PgPool,
};
use tracing::log::LevelFilter;

/// A common database pool type.
pub type DbPool = PgPool;

/// Connects to the database based on some configuration.
///
/// Fails if the database cannot be reached, so a misconfigured service never starts.
#[tracing::instrument(skip_all, fields(host = %config.host, database = %config.database_name))]
pub async fn init_db(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let db_options = PgConnectOptions::default()
        .username(&config.username)
        .password(&config.password)
        .host(&config.host)
        .port(config.port)
        .database(&config.database_name)
        .ssl_mode(PgSslMode::Prefer)
        .log_statements(LevelFilter::Debug);
    let db: PgPool = PoolOptions::default()
        .acquire_timeout(config.acquire_timeout)
        .min_connections(1)
        .max_connections(config.max_connections)
        .connect_with(db_options)
        .await?;
    tracing::info!("Connected to database");
    Ok(db)
}

/// Creates or upgrades the tables.
pub async fn migrate(db: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(db).await?;
    tracing::info!("Database is up to date");
    Ok(())
}

/// The PostgreSQL storage gateway.
///
/// The queries for each record kind live next to the record type.
#[derive(Clone, Debug)]
pub struct PgRepository {
    db: DbPool,
}

impl PgRepository {
    /// Creates a new repository on top of a pool.
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Returns the underlying pool.
    pub fn db(&self) -> &DbPool {
        &self.db
    }
}
