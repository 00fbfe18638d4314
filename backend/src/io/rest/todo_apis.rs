//! REST endpoints for todo CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use shared::{CreateTodoRequest, UpdateTodoRequest};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", get(get_todo).put(update_todo).delete(delete_todo))
}

/// List all todos
async fn list_todos(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/todos");

    match state.todo_service.list_todos().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list todos: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing todos").into_response()
        }
    }
}

/// Create a new todo
async fn create_todo(
    State(state): State<AppState>,
    Json(request): Json<CreateTodoRequest>,
) -> impl IntoResponse {
    info!("POST /api/todos - request: {:?}", request);

    match state.todo_service.create_todo(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create todo: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get a todo by id
async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/todos/{}", id);

    match state.todo_service.get_todo(&id).await {
        Ok(Some(todo)) => (StatusCode::OK, Json(todo)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Todo not found").into_response(),
        Err(e) => {
            error!("Failed to get todo: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving todo").into_response()
        }
    }
}

/// Update a todo's title and completed flag
async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTodoRequest>,
) -> impl IntoResponse {
    info!("PUT /api/todos/{} - request: {:?}", id, request);

    match state.todo_service.update_todo(&id, request).await {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Todo not found").into_response(),
        Err(e) => {
            error!("Failed to update todo: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Delete a todo. Responds 204 whether or not the id existed.
async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/todos/{}", id);

    match state.todo_service.delete_todo(&id).await {
        Ok(_) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete todo: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting todo").into_response()
        }
    }
}
