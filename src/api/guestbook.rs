//! Guestbook endpoints

use crate::api::error_response;
use crate::api::guestbook::schemas::CreateEntry;
use crate::core::traits::GuestbookService;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use di_axum::Inject;

/// Most entries a single list response will carry.
const MAX_LIST_ENTRIES: i64 = 50;

const MAX_NAME_CHARS: usize = 100;
const MAX_MESSAGE_CHARS: usize = 1000;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/:id", delete(delete_entry))
}

async fn list_entries(Inject(guestbook_service): Inject<dyn GuestbookService>) -> Response {
    match guestbook_service.list_entries(MAX_LIST_ENTRIES).await {
        Ok(entries) => Json(
            entries
                .into_iter()
                .map(schemas::Entry::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(()) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch entries"),
    }
}

async fn create_entry(
    Inject(guestbook_service): Inject<dyn GuestbookService>,
    Json(create_entry): Json<CreateEntry>,
) -> Response {
    let (name, message) = match validate_create(create_entry) {
        Ok(fields) => fields,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    match guestbook_service.create_entry(name, message).await {
        Ok(entry) => {
            (StatusCode::CREATED, Json(schemas::Entry::from(entry))).into_response()
        }
        Err(()) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to add entry"),
    }
}

async fn delete_entry(
    Inject(guestbook_service): Inject<dyn GuestbookService>,
    Path(id): Path<i64>,
) -> Response {
    match guestbook_service.delete_entry(id).await {
        Ok(()) => Json(schemas::Deleted {
            message: "Entry deleted".to_string(),
        })
        .into_response(),
        Err(()) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete entry"),
    }
}

/// Checks presence first, then name length, then message length; the first
/// failing check wins. Lengths are counted in characters, not bytes.
fn validate_create(request: CreateEntry) -> Result<(String, String), &'static str> {
    let name = request.name.unwrap_or_default();
    let message = request.message.unwrap_or_default();

    if name.is_empty() || message.is_empty() {
        return Err("Name and message are required");
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err("Name must be under 100 characters");
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err("Message must be under 1000 characters");
    }

    Ok((name, message))
}

pub mod schemas {
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize, Debug)]
    pub struct CreateEntry {
        pub name: Option<String>,
        pub message: Option<String>,
    }

    #[derive(Serialize, Debug)]
    pub struct Entry {
        pub id: i64,
        pub name: String,
        pub message: String,
        pub created_at: DateTime<Utc>,
    }

    impl From<entities::GuestbookEntry> for Entry {
        fn from(entry: entities::GuestbookEntry) -> Self {
            Entry {
                id: entry.id,
                name: entry.name,
                message: entry.message,
                created_at: entry.created_at,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct Deleted {
        pub message: String,
    }
}
