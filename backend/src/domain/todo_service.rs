//! Domain service for todo CRUD.
//!
//! Sits between the REST surface and the repository: validates requests,
//! logs what happened, and shapes DTO responses.

use anyhow::Result;
use tracing::{info, warn};

use shared::{CreateTodoRequest, Todo, TodoListResponse, TodoResponse, UpdateTodoRequest};

use crate::storage::TodoRepository;

const MAX_TITLE_LEN: usize = 256;

#[derive(Clone)]
pub struct TodoService {
    repo: TodoRepository,
}

impl TodoService {
    pub fn new(repo: TodoRepository) -> Self {
        Self { repo }
    }

    /// Create a new todo
    pub async fn create_todo(&self, request: CreateTodoRequest) -> Result<TodoResponse> {
        let title = request.title.trim();
        validate_title(title)?;

        let todo = self.repo.create(title).await?;
        info!("created todo {} ({})", todo.id, todo.title);

        Ok(TodoResponse {
            todo,
            success_message: "Todo created successfully".to_string(),
        })
    }

    /// Get a todo by id
    pub async fn get_todo(&self, id: &str) -> Result<Option<Todo>> {
        let todo = self.repo.get_by_id(id).await?;
        if todo.is_none() {
            warn!("todo not found: {}", id);
        }
        Ok(todo)
    }

    /// List all todos
    pub async fn list_todos(&self) -> Result<TodoListResponse> {
        let todos = self.repo.list_all().await?;
        info!("listed {} todos", todos.len());
        Ok(TodoListResponse { todos })
    }

    /// Update a todo's title and completed flag.
    ///
    /// `None` means no row matched the id; nothing was written.
    pub async fn update_todo(
        &self,
        id: &str,
        request: UpdateTodoRequest,
    ) -> Result<Option<TodoResponse>> {
        let title = request.title.trim();
        validate_title(title)?;
        let completed = i32::from(request.completed != 0);

        if !self.repo.update(id, title, completed).await? {
            warn!("update skipped, todo not found: {}", id);
            return Ok(None);
        }

        info!("updated todo {}", id);
        Ok(Some(TodoResponse {
            todo: Todo {
                id: id.to_string(),
                title: title.to_string(),
                completed,
            },
            success_message: "Todo updated successfully".to_string(),
        }))
    }

    /// Delete a todo. Deleting an unknown id is a no-op.
    pub async fn delete_todo(&self, id: &str) -> Result<bool> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!("deleted todo {}", id);
        } else {
            warn!("delete skipped, todo not found: {}", id);
        }
        Ok(deleted)
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(anyhow::anyhow!("Todo title cannot be empty"));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(anyhow::anyhow!(
            "Todo title cannot exceed {} characters",
            MAX_TITLE_LEN
        ));
    }
    Ok(())
}
