//! DI "Interfaces"

use crate::infrastructure::entities;
use async_trait::async_trait;

#[async_trait]
pub trait GuestbookService: Send + Sync {
    /// Lists the most recent entries, newest first.
    ///
    /// Returns `Err` if storage could not be queried.
    async fn list_entries(&self, limit: i64) -> Result<Vec<entities::GuestbookEntry>, ()>;

    /// Persists a new entry and returns it with its assigned id.
    ///
    /// The returned `created_at` is the service's own clock reading; the
    /// stored default may differ by milliseconds.
    async fn create_entry(
        &self,
        name: String,
        message: String,
    ) -> Result<entities::GuestbookEntry, ()>;

    /// Deletes an entry by id.
    ///
    /// Deleting an id that does not exist is not an error; storage simply
    /// affects zero rows.
    async fn delete_entry(&self, id: i64) -> Result<(), ()>;
}
