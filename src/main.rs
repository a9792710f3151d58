//! Guestbook HTTP API over a pooled SQLite database

use guestbook_api::api;
use guestbook_api::core::services::MyGuestbookService;
use guestbook_api::infrastructure::database;
use guestbook_api::infrastructure::database::{DatabaseConnection, DbSettings};
use guestbook_api::infrastructure::repositories::DbGuestbookRepository;

use axum::http::Method;
use axum::{Router, routing::get};
use di::{Injectable, ServiceCollection};
use di_axum::RouterServiceProviderExtensions;
use log::info;
use tokio::runtime::{Builder, Runtime};
use tower_http::cors::{Any, CorsLayer};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(async {
        // The pool and schema must be ready before any request is served.
        let settings = DbSettings::from_env();
        let pool = database::connect_with_retry(&settings).await?;
        DatabaseConnection::set_shared_pool(pool);

        web_server_task().await
    })
}

async fn web_server_task() -> anyhow::Result<()> {
    let provider = ServiceCollection::new()
        .add(DatabaseConnection::singleton())
        .add(DbGuestbookRepository::scoped())
        .add(MyGuestbookService::scoped())
        .build_provider()
        .unwrap();

    // build our application with a route
    let app = Router::new()
        .route("/api/health", get(api::health))
        .nest("/api/guestbook", api::guestbook::router())
        .layer(
            CorsLayer::new()
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_origin(Any),
        )
        .with_provider(provider);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(3000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("guestbook API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
