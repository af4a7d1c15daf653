//! HTTP server - routing, shared state and startup

mod error;
mod handlers;

pub use error::HttpError;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::store::Store;
use crate::Blog;

/// Per-process state threaded through every handler.
///
/// The store handle is opened once at startup; handlers never reach for
/// process globals.
pub struct AppState {
    pub blog: Blog,
    pub store: Mutex<Store>,
}

pub type SharedState = Arc<AppState>;

/// Open the store backend the configuration asks for.
pub fn open_store(blog: &Blog) -> Result<Store> {
    if blog.config.memory_db {
        Ok(Store::in_memory())
    } else {
        Store::open(blog.db_path())
    }
}

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    let static_dir = state.blog.static_dir.clone();

    Router::new()
        .route("/", get(handlers::index))
        .route("/page/:page", get(handlers::page))
        .route(
            "/contact",
            get(handlers::contact).post(handlers::submit_contact),
        )
        .route("/about", get(handlers::about))
        .route("/post/:slug", get(handlers::blog_post))
        .route("/comment", post(handlers::submit_comment))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the blog server.
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let store = open_store(blog)?;
    let state = Arc::new(AppState {
        blog: blog.clone(),
        store: Mutex::new(store),
    });
    let app = router(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Serving blog at http://{}:{}", ip, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
