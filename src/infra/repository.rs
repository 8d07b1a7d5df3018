//! The storage gateway.
//!
//! Every record kind is stored through a [`Repository`]. Records are soft deleted:
//! [`Repository::soft_delete`] stamps `deleted_at`, and from then on the record is
//! invisible to [`Repository::find_all`] and [`Repository::find_by_id`] and cannot be
//! saved or deleted again. Nothing is ever physically removed.

use super::error::ApiResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// A row kept by a [`Repository`].
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// The client-supplied fields needed to create a record.
    type New: Debug + Send + Sync + 'static;

    /// A human readable name of the record kind, used in error messages.
    const KIND: &'static str;

    /// The system-assigned id.
    fn id(&self) -> i32;

    /// Builds a freshly stored record.
    fn from_new(id: i32, now: DateTime<Utc>, new: Self::New) -> Self;

    /// Copies the client-editable fields of `from`, leaving id and timestamps alone.
    fn assign(&mut self, from: &Self);

    /// Marks the record as modified at `now`.
    fn touch(&mut self, now: DateTime<Utc>);

    /// When the record was soft deleted, if ever.
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Soft deletes the record at `now`.
    fn mark_deleted(&mut self, now: DateTime<Utc>);
}

/// Anything that can store records of kind `T`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Lists every live record, ordered by id.
    async fn find_all(&self) -> ApiResult<Vec<T>>;

    /// Fetches a live record.
    async fn find_by_id(&self, id: i32) -> ApiResult<Option<T>>;

    /// Stores a new record and returns it with its id and timestamps.
    async fn create(&self, new: T::New) -> ApiResult<T>;

    /// Overwrites the client-editable fields of a live record.
    async fn save(&self, record: &T) -> ApiResult<T>;

    /// Hides a live record from all further reads.
    async fn soft_delete(&self, record: &T) -> ApiResult<()>;
}
