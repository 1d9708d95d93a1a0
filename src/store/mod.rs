//! Relational store subsystem.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → Store::read(|conn| ...)   (plain reads)
//!     → Store::write(|tx| ...)    (BEGIN → closure → COMMIT, or ROLLBACK on Err)
//!         → spawn_blocking (SQLite never runs on the async executor)
//!         → projects.rs / tasks.rs (queries over a borrowed connection)
//!     → domain types back to the handler
//! ```
//!
//! # Design Decisions
//! - One explicit `Store` handle, opened at startup and passed to handlers
//! - A single connection behind a mutex serializes writers
//! - Query functions borrow a `Connection` so they compose inside one transaction
//! - Foreign keys are enforced; deleting a project cascades to its tasks

pub mod db;
pub mod error;
pub mod projects;
pub mod schema;
pub mod tasks;

pub use db::Store;
pub use error::{Entity, StoreError};
