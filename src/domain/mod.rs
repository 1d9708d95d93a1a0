//! Domain model for projects and tasks.
//!
//! # Data Flow
//! ```text
//! JSON body
//!     → ProjectInput / TaskInput (raw, every field optional)
//!     → validation.rs (required fields, trimming, defaults)
//!     → NewProject / NewTask (validated, ready to insert)
//!
//! JSON patch body
//!     → ProjectPatch / TaskPatch (each field Absent | Null | Value)
//!     → validation.rs (non-nullable fields, trimming)
//!     → applied onto the stored row inside the write transaction
//! ```
//!
//! # Design Decisions
//! - Validation is pure and runs before any store access
//! - `title` is the task label, `description` is free-text notes
//! - Ids never appear in inputs or patches; the store assigns them

pub mod patch;
pub mod project;
pub mod task;
pub mod validation;

pub use patch::Patch;
pub use project::{NewProject, Project, ProjectInput, ProjectPatch, ProjectWithTasks};
pub use task::{NewTask, Task, TaskInput, TaskPatch, TaskStatus, DEFAULT_PRIORITY};
pub use validation::ValidationError;
