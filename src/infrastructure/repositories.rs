//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::GuestbookEntry;
use crate::infrastructure::traits::GuestbookRepository;
use async_trait::async_trait;
use di::{Ref, injectable};
use log::error;

#[injectable(GuestbookRepository)]
pub struct DbGuestbookRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl GuestbookRepository for DbGuestbookRepository {
    async fn list_recent(&self, limit: i64) -> Result<Vec<GuestbookEntry>, ()> {
        sqlx::query_as(
            "SELECT id, name, message, created_at FROM guestbook ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&**self.connection)
        .await
        .map_err(|e| error!("{e}"))
    }

    async fn insert(&self, name: &str, message: &str) -> Result<i64, ()> {
        sqlx::query("INSERT INTO guestbook (name, message) VALUES (?, ?)")
            .bind(name)
            .bind(message)
            .execute(&**self.connection)
            .await
            .map(|result| result.last_insert_rowid())
            .map_err(|e| error!("{e}"))
    }

    async fn delete(&self, id: i64) -> Result<u64, ()> {
        sqlx::query("DELETE FROM guestbook WHERE id = ?")
            .bind(id)
            .execute(&**self.connection)
            .await
            .map(|result| result.rows_affected())
            .map_err(|e| error!("{e}"))
    }
}
