//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities;
use async_trait::async_trait;

#[async_trait]
pub trait GuestbookRepository: Send + Sync {
    /// Fetches the most recent entries, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<entities::GuestbookEntry>, ()>;

    /// Inserts an entry and returns the id storage assigned to it.
    async fn insert(&self, name: &str, message: &str) -> Result<i64, ()>;

    /// Deletes an entry by id, returning the number of rows affected.
    async fn delete(&self, id: i64) -> Result<u64, ()>;
}
