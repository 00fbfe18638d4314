//! REST interface layer.
//!
//! A pure translation layer: handlers log the request, call into the domain
//! services, and map results to HTTP status codes. Domain errors never reach
//! the page as structured payloads, only as generic failure statuses.

pub mod todo_apis;
pub mod todo_table_apis;
