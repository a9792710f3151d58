//! Implementations for the service the app needs.
//!

use crate::core::traits::GuestbookService;
use crate::infrastructure::entities::GuestbookEntry;
use crate::infrastructure::traits::GuestbookRepository;
use async_trait::async_trait;
use chrono::Utc;
use di::{Ref, injectable};

#[injectable(GuestbookService)]
pub struct MyGuestbookService {
    repo: Ref<dyn GuestbookRepository>,
}

#[async_trait]
impl GuestbookService for MyGuestbookService {
    async fn list_entries(&self, limit: i64) -> Result<Vec<GuestbookEntry>, ()> {
        self.repo.list_recent(limit).await
    }

    async fn create_entry(&self, name: String, message: String) -> Result<GuestbookEntry, ()> {
        let id = self.repo.insert(&name, &message).await?;

        Ok(GuestbookEntry {
            id,
            name,
            message,
            created_at: Utc::now(),
        })
    }

    async fn delete_entry(&self, id: i64) -> Result<(), ()> {
        self.repo.delete(id).await.map(|_rows_affected| ())
    }
}
