//! REST endpoints for the editable table widget.
//!
//! The widget drives the interaction loop through two calls: fetching the
//! tabular model and committing a batch of edited rows. Both answer with
//! freshly loaded data so the widget always re-renders authoritative state.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::{error, info};

use shared::{CommitEditsResponse, EditedRows};

use crate::domain::{UserIntent, ViewState};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/table", get(get_table))
        .route("/table/edits", post(commit_edits))
}

/// Tabular model for the grid
async fn get_table(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/todos/table");

    let refresh = state
        .table_service
        .advance(ViewState::IdleDisplay, UserIntent::Refresh)
        .await;

    match refresh {
        Ok(interaction) => (StatusCode::OK, Json(interaction.table)).into_response(),
        Err(e) => {
            error!("Failed to load todo table: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading todo table").into_response()
        }
    }
}

/// Commit a batch of edited rows and return the reloaded table
async fn commit_edits(
    State(state): State<AppState>,
    Json(edits): Json<EditedRows>,
) -> impl IntoResponse {
    info!("POST /api/todos/table/edits - {} rows", edits.rows.len());

    let committed = state
        .table_service
        .advance(ViewState::IdleDisplay, UserIntent::CommitEdits(edits))
        .await;

    match committed {
        Ok(interaction) => {
            let response = CommitEditsResponse {
                outcome: interaction.outcome.unwrap_or_default(),
                table: interaction.table,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to commit table edits: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error committing edits").into_response()
        }
    }
}
