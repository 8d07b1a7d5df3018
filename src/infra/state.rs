//! Global application state.
//!
//! Used for access to common resources such as the configuration
//! and the storage gateways.

use super::{
    config::{Config, StorageBackend},
    database::{self, PgRepository},
    memory::MemoryRepository,
    repository::Repository,
};
use crate::feature::{invoice::invoice_repository::Invoice, item::item_repository::Item};
use axum::extract::FromRef;
use std::{fmt, sync::Arc};

/// A shared handle to the storage of one record kind.
pub type Store<T> = Arc<dyn Repository<T>>;

/// Global application state.
#[derive(Clone, FromRef)]
pub struct AppState {
    config: Config,
    items: Store<Item>,
    invoices: Store<Invoice>,
}

impl AppState {
    /// Constructs a new [`AppState`].
    pub fn new(config: Config, items: Store<Item>, invoices: Store<Invoice>) -> Self {
        Self {
            config,
            items,
            invoices,
        }
    }

    /// State backed by a PostgreSQL pool.
    pub fn postgres(config: Config, db: database::DbPool) -> Self {
        let repository = PgRepository::new(db);
        Self::new(
            config,
            Arc::new(repository.clone()),
            Arc::new(repository),
        )
    }

    /// State that keeps everything in memory.
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            Arc::new(MemoryRepository::new()),
            Arc::new(MemoryRepository::new()),
        )
    }

    /// Connects to the configured storage backend.
    ///
    /// For PostgreSQL this also brings the schema up to date.
    pub async fn from_config(config: Config) -> color_eyre::Result<Self> {
        match config.database.backend {
            StorageBackend::Postgres => {
                let db = database::init_db(&config.database).await?;
                database::migrate(&db).await?;
                Ok(Self::postgres(config, db))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage, records are lost on shutdown");
                Ok(Self::in_memory(config))
            }
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the item storage.
    pub fn items(&self) -> &Store<Item> {
        &self.items
    }

    /// Returns the invoice storage.
    pub fn invoices(&self) -> &Store<Invoice> {
        &self.invoices
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
