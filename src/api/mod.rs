use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub mod guestbook;

/// Error payload shared by every failing endpoint.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        service: "guestbook-api",
    })
}
