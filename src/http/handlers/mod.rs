//! Request handlers.
//!
//! Each handler follows the same shape: decode → validate → one store call
//! (inside a transaction when it writes) → envelope + status code. Errors
//! convert to [`ApiError`](crate::http::error::ApiError) at the boundary.

pub mod fallback;
pub mod health;
pub mod projects;
pub mod tasks;

pub use fallback::{method_not_allowed, route_not_found};
pub use health::health;
pub use projects::{create_project, delete_project, get_project, list_projects, update_project};
pub use tasks::{create_task, delete_task, get_task, list_tasks, update_task};
