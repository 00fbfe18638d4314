//! Repository for todo rows.
//!
//! Every function opens exactly one session scope, runs its statement, and
//! lets the scope end. There is no batching and no transaction spanning two
//! calls; each mutation commits independently.

use std::sync::Arc;

use anyhow::Result;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::error;

use shared::Todo;

use crate::storage::session::SessionFactory;

#[derive(Clone)]
pub struct TodoRepository {
    sessions: Arc<SessionFactory>,
}

impl TodoRepository {
    pub fn new(sessions: Arc<SessionFactory>) -> Self {
        Self { sessions }
    }

    /// List every todo in natural storage order
    pub async fn list_all(&self) -> Result<Vec<Todo>> {
        let mut session = self.sessions.session().await?;
        let rows = sqlx::query("SELECT id, title, completed FROM todos")
            .fetch_all(session.executor())
            .await?;
        session.close().await?;

        Ok(rows.iter().map(row_to_todo).collect())
    }

    /// Fetch a single todo, `None` when the id is unknown
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Todo>> {
        let mut session = self.sessions.session().await?;
        let row = sqlx::query("SELECT id, title, completed FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(session.executor())
            .await?;
        session.close().await?;

        Ok(row.as_ref().map(row_to_todo))
    }

    /// Insert a new todo with a fresh id and `completed = 0`
    pub async fn create(&self, title: &str) -> Result<Todo> {
        let todo = Todo {
            id: Todo::generate_id(),
            title: title.to_string(),
            completed: 0,
        };

        let mut session = self.sessions.session().await?;
        let inserted = sqlx::query("INSERT INTO todos (id, title, completed) VALUES ($1, $2, $3)")
            .bind(&todo.id)
            .bind(&todo.title)
            .bind(todo.completed)
            .execute(session.executor())
            .await;

        match inserted {
            Ok(_) => {
                session.commit().await?;
                Ok(todo)
            }
            Err(e) => {
                // session drops here and rolls back
                error!("error creating todo {}: {}", todo.id, e);
                Err(e.into())
            }
        }
    }

    /// Overwrite title and completed for an existing todo.
    ///
    /// Returns false when no row matched the id; the row count is the only
    /// signal, there is no error for a missing todo.
    pub async fn update(&self, id: &str, title: &str, completed: i32) -> Result<bool> {
        let mut session = self.sessions.session().await?;
        let result = sqlx::query("UPDATE todos SET title = $1, completed = $2 WHERE id = $3")
            .bind(title)
            .bind(completed)
            .bind(id)
            .execute(session.executor())
            .await?;
        session.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a todo. Idempotent: a second call for the same id is a no-op
    /// and returns false.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut session = self.sessions.session().await?;
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(session.executor())
            .await?;
        session.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_todo(row: &AnyRow) -> Todo {
    Todo {
        id: row.get("id"),
        title: row.get("title"),
        completed: row.get("completed"),
    }
}
