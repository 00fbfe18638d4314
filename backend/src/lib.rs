//! Backend for the todo grid.
//!
//! Layered the usual way: the REST interface translates HTTP to domain
//! calls, the domain services own validation and the interaction loop, and
//! the storage layer owns drivers, pooling, sessions and the repository.
//! The browser page served at `/` is a black-box view: it renders the
//! tabular model and posts user intents back to the API.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::Method,
    response::Html,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::domain::{TodoService, TodoTableService};
use crate::io::rest::{todo_apis, todo_table_apis};
use crate::storage::{PoolRegistry, SessionFactory, TodoRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub todo_service: TodoService,
    pub table_service: TodoTableService,
}

/// Wire the service stack over an already-built session factory.
///
/// Kept separate from `initialize_backend` so tests can drop in an
/// in-memory factory.
pub fn build_state(sessions: Arc<SessionFactory>) -> AppState {
    let todo_service = TodoService::new(TodoRepository::new(sessions));
    let table_service = TodoTableService::new(todo_service.clone());
    AppState {
        todo_service,
        table_service,
    }
}

/// Resolve storage for the configured profile, bootstrap the schema once,
/// and wire the services.
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("initializing backend for {} environment", config.environment);

    let pools = Arc::new(PoolRegistry::new());
    let sessions = Arc::new(SessionFactory::new(config, pools));
    sessions.bootstrap().await?;

    Ok(build_state(sessions))
}

/// Build the application router: the page at `/`, the API under `/api`.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let todos = todo_apis::router().merge(todo_table_apis::router());

    Router::new()
        .route("/", get(index))
        .nest("/api/todos", todos)
        .layer(cors)
        .with_state(state)
}

/// The grid page
async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}
