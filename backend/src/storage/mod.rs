//! Storage layer: driver variants, pool registry, session scopes, schema
//! bootstrap, and the todo repository.

pub mod driver;
pub mod pool;
pub mod schema;
pub mod session;
pub mod todo_repository;

pub use driver::{driver_for, ConnectionDriver, DriverKind, PostgresDriver, SqliteDriver};
pub use pool::PoolRegistry;
pub use session::{DbSession, SessionFactory};
pub use todo_repository::TodoRepository;
