//! Domain layer: business logic between the REST surface and storage.

pub mod todo_service;
pub mod todo_table;

pub use todo_service::TodoService;
pub use todo_table::{Interaction, TodoTableService, UserIntent, ViewState};
