//! Database entities

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct GuestbookEntry {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
