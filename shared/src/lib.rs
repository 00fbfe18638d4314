use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A todo item as persisted in the `todos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Opaque unique identifier, assigned once at creation time
    pub id: String,
    /// Free-text title
    pub title: String,
    /// Completion flag stored as an integer (0 = open, 1 = done)
    pub completed: i32,
}

impl Todo {
    /// Generate a fresh todo identifier
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// One row of the editable grid.
///
/// `delete` never reaches storage; it only signals, at edit-commit time,
/// that the row should be removed instead of updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoRow {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub delete: bool,
}

impl TodoRow {
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            title: todo.title.clone(),
            completed: todo.completed != 0,
            delete: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: String,
    /// Completion flag (0/1), mirroring the stored column
    pub completed: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub todo: Todo,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

/// Tabular model handed to the grid widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoTableResponse {
    pub rows: Vec<TodoRow>,
}

/// Changed fields of a single edited row.
///
/// Only the fields the user actually touched are present, exactly the shape
/// the grid widget emits on edit commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

impl RowEdit {
    /// True when the delete checkbox was ticked
    pub fn marked_for_delete(&self) -> bool {
        self.delete == Some(true)
    }
}

/// Edited rows keyed by row position in the rendered table, delivered
/// atomically by the view layer on edit commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditedRows {
    pub rows: BTreeMap<usize, RowEdit>,
}

/// Counters describing what an edit commit actually did
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EditOutcome {
    pub updated: u32,
    pub deleted: u32,
    pub skipped: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitEditsResponse {
    pub outcome: EditOutcome,
    /// Authoritative state re-fetched after the mutations
    pub table: TodoTableResponse,
}
