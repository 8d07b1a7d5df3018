//! A storage gateway that keeps records in process memory.

use super::{
    error::{ApiResult, ClientError},
    repository::{Record, Repository},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::instrument;

/// Stores records of kind `T` in an ordered map.
#[derive(Debug)]
pub struct MemoryRepository<T> {
    table: Mutex<Table<T>>,
}

#[derive(Debug)]
struct Table<T> {
    last_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> MemoryRepository<T> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ApiResult<Vec<T>> {
        let table = self.table.lock().await;
        let records: Vec<T> = table
            .rows
            .values()
            .filter(|record| record.deleted_at().is_none())
            .cloned()
            .collect();
        tracing::debug!("Listed {} {} records", records.len(), T::KIND);
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> ApiResult<Option<T>> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .get(&id)
            .filter(|record| record.deleted_at().is_none())
            .cloned())
    }

    #[instrument(skip(self))]
    async fn create(&self, new: T::New) -> ApiResult<T> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let record = T::from_new(table.last_id, Utc::now(), new);
        table.rows.insert(record.id(), record.clone());
        tracing::debug!("Created {:?}", record);
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn save(&self, record: &T) -> ApiResult<T> {
        let mut table = self.table.lock().await;
        let stored = table
            .rows
            .get_mut(&record.id())
            .filter(|stored| stored.deleted_at().is_none())
            .ok_or(ClientError::NotFound(T::KIND))?;
        stored.assign(record);
        stored.touch(Utc::now());
        Ok(stored.clone())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, record: &T) -> ApiResult<()> {
        let mut table = self.table.lock().await;
        let stored = table
            .rows
            .get_mut(&record.id())
            .filter(|stored| stored.deleted_at().is_none())
            .ok_or(ClientError::NotFound(T::KIND))?;
        let now = Utc::now();
        stored.mark_deleted(now);
        stored.touch(now);
        Ok(())
    }
}
