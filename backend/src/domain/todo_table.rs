//! Editable-table domain logic.
//!
//! Turns the todo set into the tabular model the grid widget renders, and
//! turns the widget's edit commits back into repository calls. The widget
//! itself is a black box; everything it can do arrives here as one of a
//! small set of user intents driving a three-state interaction loop:
//!
//! - **idle-display**: the grid is showing current data
//! - **add-form-open**: the new-item form is on screen
//! - **row-edited**: an edit commit is being applied
//!
//! Every mutating transition ends back in idle-display with a freshly
//! loaded table, so the view always converges on authoritative state even
//! after a failed mutation.

use anyhow::Result;
use tracing::{error, warn};

use shared::{
    CommitEditsResponse, CreateTodoRequest, EditOutcome, EditedRows, TodoRow, TodoTableResponse,
    UpdateTodoRequest,
};

use crate::domain::todo_service::TodoService;

/// Externally visible state of the interaction loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    IdleDisplay,
    AddFormOpen,
    RowEdited,
}

/// What the user did in the widget
#[derive(Debug, Clone)]
pub enum UserIntent {
    Refresh,
    OpenAddForm,
    SubmitNew { title: String },
    CommitEdits(EditedRows),
}

/// Result of advancing the loop by one intent
#[derive(Debug, Clone)]
pub struct Interaction {
    pub state: ViewState,
    pub table: TodoTableResponse,
    /// Present only after an edit commit
    pub outcome: Option<EditOutcome>,
}

#[derive(Clone)]
pub struct TodoTableService {
    todos: TodoService,
}

impl TodoTableService {
    pub fn new(todos: TodoService) -> Self {
        Self { todos }
    }

    /// Build the tabular model: one row per todo, delete flag unset
    pub async fn load(&self) -> Result<TodoTableResponse> {
        let todos = self.todos.list_todos().await?.todos;
        let rows = todos.iter().map(TodoRow::from_todo).collect();
        Ok(TodoTableResponse { rows })
    }

    /// Apply an edit commit row by row, then reload.
    ///
    /// Rows are resolved by position against a fresh snapshot and processed
    /// in ascending position order. A ticked delete flag wins over field
    /// edits. Each row's mutation commits independently: a failure is
    /// logged, counted, and does not undo earlier rows or stop later ones.
    pub async fn commit_edits(&self, edits: &EditedRows) -> Result<CommitEditsResponse> {
        let snapshot = self.load().await?.rows;
        let mut outcome = EditOutcome::default();

        for (&position, edit) in &edits.rows {
            let Some(row) = snapshot.get(position) else {
                warn!("edited row {} is outside the table, skipping", position);
                outcome.skipped += 1;
                continue;
            };

            if edit.marked_for_delete() {
                match self.todos.delete_todo(&row.id).await {
                    Ok(true) => outcome.deleted += 1,
                    Ok(false) => outcome.skipped += 1,
                    Err(e) => {
                        error!("error deleting todo {}: {}", row.id, e);
                        outcome.failed += 1;
                    }
                }
            } else {
                let request = UpdateTodoRequest {
                    title: edit.title.clone().unwrap_or_else(|| row.title.clone()),
                    completed: i32::from(edit.completed.unwrap_or(row.completed)),
                };
                match self.todos.update_todo(&row.id, request).await {
                    Ok(Some(_)) => outcome.updated += 1,
                    Ok(None) => outcome.skipped += 1,
                    Err(e) => {
                        error!("error updating todo {}: {}", row.id, e);
                        outcome.failed += 1;
                    }
                }
            }
        }

        // Full reload: the widget re-renders from authoritative state
        let table = self.load().await?;
        Ok(CommitEditsResponse { outcome, table })
    }

    /// Advance the interaction loop by one user intent.
    pub async fn advance(&self, state: ViewState, intent: UserIntent) -> Result<Interaction> {
        match (state, intent) {
            (ViewState::IdleDisplay, UserIntent::Refresh) => Ok(Interaction {
                state: ViewState::IdleDisplay,
                table: self.load().await?,
                outcome: None,
            }),
            (ViewState::IdleDisplay, UserIntent::OpenAddForm) => Ok(Interaction {
                state: ViewState::AddFormOpen,
                table: self.load().await?,
                outcome: None,
            }),
            (ViewState::AddFormOpen, UserIntent::SubmitNew { title }) => {
                // The form swallows creation failures; the reload below
                // shows whatever state the database is actually in.
                if let Err(e) = self.todos.create_todo(CreateTodoRequest { title }).await {
                    error!("error creating todo from form: {}", e);
                }
                Ok(Interaction {
                    state: ViewState::IdleDisplay,
                    table: self.load().await?,
                    outcome: None,
                })
            }
            (ViewState::IdleDisplay, UserIntent::CommitEdits(edits)) => {
                // Passes through row-edited and settles back on idle-display
                let committed = self.commit_edits(&edits).await?;
                Ok(Interaction {
                    state: ViewState::IdleDisplay,
                    table: committed.table,
                    outcome: Some(committed.outcome),
                })
            }
            (state, intent) => {
                warn!("intent {:?} not valid in state {:?}, reloading", intent, state);
                Ok(Interaction {
                    state: ViewState::IdleDisplay,
                    table: self.load().await?,
                    outcome: None,
                })
            }
        }
    }
}
